fn main() {
    // cfg.toml の変更時に toml-cfg の定数を再生成する
    println!("cargo:rerun-if-changed=cfg.toml");

    #[cfg(feature = "esp")]
    embuild::espidf::sysenv::output();
}

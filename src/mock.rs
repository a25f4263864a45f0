//! テスト用のモック実装
//!
//! 実際のハードウェアを使わずに ArduChip (SPI + CS)、OV2640 (SCCB)、
//! 遅延、トランスポートをシミュレートします。
//! 状態は `Arc<Mutex<_>>` で共有されるため、ドライバーに所有権を渡した後も
//! クローンからテストで検証できます。

use std::collections::{BTreeMap, VecDeque};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, I2c, NoAcknowledgeSource, Operation};
use embedded_hal::spi::{self, SpiBus};

use crate::communication::{SerialPort, Transport};
use crate::hardware::bus::OV2640_SCCB_ADDR;
use crate::hardware::registers::{
    ARDUCHIP_FIFO, ARDUCHIP_TEST1, ARDUCHIP_TRIG, ARDUCHIP_WRITE_FLAG, BURST_FIFO_READ,
    CAP_DONE_MASK, FIFO_CLEAR_MASK, FIFO_RDPTR_RST_MASK, FIFO_SIZE1, FIFO_SIZE2, FIFO_SIZE3,
    FIFO_START_MASK,
};

/// Position inside one chip-select framed SPI transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpiPhase {
    Deselected,
    Command,
    WriteData(u8),
    ReadData(u8),
    Burst,
    Done,
}

#[derive(Debug)]
struct ChipState {
    regs: [u8; 128],
    writes: Vec<(u8, u8)>,
    phase: SpiPhase,
    cs_low: bool,
    frame: Vec<u8>,
    read_ptr: usize,
    reported_length: u32,
    capturing: bool,
    cap_done: bool,
    pending_polls: u32,
    polls_left: u32,
    never_completes: bool,
    captures_started: u32,
    burst_bytes: usize,
    bursts: u32,
    stray_bytes: usize,
    test_stuck: Option<u8>,
    spi_fault: bool,
}

impl ChipState {
    fn new() -> Self {
        Self {
            regs: [0; 128],
            writes: Vec::new(),
            phase: SpiPhase::Deselected,
            cs_low: false,
            frame: Vec::new(),
            read_ptr: 0,
            reported_length: 0,
            capturing: false,
            cap_done: false,
            pending_polls: 0,
            polls_left: 0,
            never_completes: false,
            captures_started: 0,
            burst_bytes: 0,
            bursts: 0,
            stray_bytes: 0,
            test_stuck: None,
            spi_fault: false,
        }
    }

    fn write_register(&mut self, address: u8, value: u8) {
        self.writes.push((address, value));
        self.regs[address as usize] = value;
        if address == ARDUCHIP_FIFO {
            if value & FIFO_CLEAR_MASK != 0 {
                self.cap_done = false;
            }
            if value & FIFO_RDPTR_RST_MASK != 0 {
                self.read_ptr = 0;
            }
            if value & FIFO_START_MASK != 0 {
                self.capturing = true;
                self.cap_done = false;
                self.polls_left = self.pending_polls;
                self.captures_started += 1;
            }
        }
    }

    fn read_register(&mut self, address: u8) -> u8 {
        match address {
            ARDUCHIP_TEST1 => self.test_stuck.unwrap_or(self.regs[address as usize]),
            ARDUCHIP_TRIG => {
                if self.capturing && !self.never_completes {
                    if self.polls_left > 0 {
                        self.polls_left -= 1;
                    } else {
                        self.capturing = false;
                        self.cap_done = true;
                    }
                }
                if self.cap_done {
                    CAP_DONE_MASK
                } else {
                    0
                }
            }
            FIFO_SIZE1 => (self.reported_length & 0xFF) as u8,
            FIFO_SIZE2 => ((self.reported_length >> 8) & 0xFF) as u8,
            FIFO_SIZE3 => ((self.reported_length >> 16) & 0xFF) as u8,
            _ => self.regs[address as usize],
        }
    }

    /// Clocks one byte out and returns the byte clocked in.
    fn clock(&mut self, byte: u8) -> u8 {
        match self.phase {
            SpiPhase::Deselected => {
                self.stray_bytes += 1;
                0
            }
            SpiPhase::Command => {
                self.phase = if byte == BURST_FIFO_READ {
                    self.bursts += 1;
                    SpiPhase::Burst
                } else if byte & ARDUCHIP_WRITE_FLAG != 0 {
                    SpiPhase::WriteData(byte & !ARDUCHIP_WRITE_FLAG)
                } else {
                    SpiPhase::ReadData(byte)
                };
                0
            }
            SpiPhase::WriteData(address) => {
                self.write_register(address, byte);
                self.phase = SpiPhase::Done;
                0
            }
            SpiPhase::ReadData(address) => {
                self.phase = SpiPhase::Done;
                self.read_register(address)
            }
            SpiPhase::Burst => {
                let value = self.frame.get(self.read_ptr).copied().unwrap_or(0);
                self.read_ptr += 1;
                self.burst_bytes += 1;
                value
            }
            SpiPhase::Done => 0,
        }
    }
}

/// ArduChip のモック (SPI バス + チップセレクト)
#[derive(Debug, Clone)]
pub struct MockArduChip {
    state: Arc<Mutex<ChipState>>,
}

impl Default for MockArduChip {
    fn default() -> Self {
        Self::new()
    }
}

impl MockArduChip {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ChipState::new())),
        }
    }

    /// SPI side of the chip.
    pub fn spi(&self) -> MockSpi {
        MockSpi {
            state: Arc::clone(&self.state),
        }
    }

    /// Chip-select pin of the chip.
    pub fn cs(&self) -> MockCsPin {
        MockCsPin {
            state: Arc::clone(&self.state),
        }
    }

    /// テスト用: FIFO に格納されるフレーム (報告される長さも合わせて設定)
    pub fn set_frame(&self, frame: Vec<u8>) {
        let mut state = self.state.lock().unwrap();
        state.reported_length = frame.len() as u32;
        state.frame = frame;
    }

    /// テスト用: FIFO_SIZE レジスタが報告する長さだけを上書き
    pub fn set_reported_length(&self, length: u32) {
        self.state.lock().unwrap().reported_length = length;
    }

    /// テスト用: キャプチャ完了までに "未完了" を返すポーリング回数
    pub fn set_pending_polls(&self, polls: u32) {
        self.state.lock().unwrap().pending_polls = polls;
    }

    /// テスト用: キャプチャが完了しないセンサーをシミュレート
    pub fn set_never_completes(&self, enable: bool) {
        self.state.lock().unwrap().never_completes = enable;
    }

    /// テスト用: テストレジスタが常に同じ値を返す
    pub fn set_test_register_stuck(&self, value: Option<u8>) {
        self.state.lock().unwrap().test_stuck = value;
    }

    /// テスト用: SPI 転送エラーをシミュレート
    pub fn set_spi_fault(&self, enable: bool) {
        self.state.lock().unwrap().spi_fault = enable;
    }

    pub fn cs_asserted(&self) -> bool {
        self.state.lock().unwrap().cs_low
    }

    /// Values written to `address`, in order.
    pub fn register_writes(&self, address: u8) -> Vec<u8> {
        self.state
            .lock()
            .unwrap()
            .writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, v)| *v)
            .collect()
    }

    /// Bytes clocked out of the FIFO by burst reads.
    pub fn burst_bytes_read(&self) -> usize {
        self.state.lock().unwrap().burst_bytes
    }

    pub fn bursts_started(&self) -> u32 {
        self.state.lock().unwrap().bursts
    }

    pub fn captures_started(&self) -> u32 {
        self.state.lock().unwrap().captures_started
    }

    /// Bytes clocked while chip-select was high.
    pub fn stray_bytes(&self) -> usize {
        self.state.lock().unwrap().stray_bytes
    }
}

/// SPI side of [`MockArduChip`].
#[derive(Debug, Clone)]
pub struct MockSpi {
    state: Arc<Mutex<ChipState>>,
}

impl spi::ErrorType for MockSpi {
    type Error = spi::ErrorKind;
}

impl MockSpi {
    fn clock_all(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), spi::ErrorKind> {
        let mut state = self.state.lock().unwrap();
        if state.spi_fault {
            return Err(spi::ErrorKind::Other);
        }
        for i in 0..read.len().max(write.len()) {
            let out = write.get(i).copied().unwrap_or(0x00);
            let value = state.clock(out);
            if let Some(slot) = read.get_mut(i) {
                *slot = value;
            }
        }
        Ok(())
    }
}

impl SpiBus<u8> for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.clock_all(words, &[])
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.clock_all(&mut [], words)
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.clock_all(read, write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        let out = words.to_vec();
        self.clock_all(words, &out)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Chip-select pin of [`MockArduChip`].
#[derive(Debug, Clone)]
pub struct MockCsPin {
    state: Arc<Mutex<ChipState>>,
}

impl digital::ErrorType for MockCsPin {
    type Error = Infallible;
}

impl OutputPin for MockCsPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.cs_low = true;
        state.phase = SpiPhase::Command;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.cs_low = false;
        state.phase = SpiPhase::Deselected;
        Ok(())
    }
}

#[derive(Debug)]
struct SccbState {
    regs: BTreeMap<(u8, u8), u8>,
    bank: u8,
    pointer: u8,
    nacks_pending: u32,
    writes: usize,
}

/// OV2640 のモック (バンク切り替え付き SCCB レジスタファイル)
#[derive(Debug, Clone)]
pub struct MockSccb {
    state: Arc<Mutex<SccbState>>,
}

impl Default for MockSccb {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSccb {
    /// OV2640 (vid 0x26, pid 0x42) を返すセンサーを作成します
    pub fn new() -> Self {
        let mut regs = BTreeMap::new();
        regs.insert((0x01, 0x0A), 0x26);
        regs.insert((0x01, 0x0B), 0x42);
        Self {
            state: Arc::new(Mutex::new(SccbState {
                regs,
                bank: 0x00,
                pointer: 0x00,
                nacks_pending: 0,
                writes: 0,
            })),
        }
    }

    pub fn set_sensor_reg(&self, bank: u8, reg: u8, value: u8) {
        self.state.lock().unwrap().regs.insert((bank, reg), value);
    }

    pub fn sensor_reg(&self, bank: u8, reg: u8) -> Option<u8> {
        self.state.lock().unwrap().regs.get(&(bank, reg)).copied()
    }

    /// Full register state, keyed by (bank, register), plus the selected bank.
    pub fn snapshot(&self) -> (BTreeMap<(u8, u8), u8>, u8) {
        let state = self.state.lock().unwrap();
        (state.regs.clone(), state.bank)
    }

    /// テスト用: 次の `count` 回のトランザクションを NACK にする
    pub fn inject_nacks(&self, count: u32) {
        self.state.lock().unwrap().nacks_pending = count;
    }

    /// Register writes accepted (bank selects included).
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }
}

impl i2c::ErrorType for MockSccb {
    type Error = i2c::ErrorKind;
}

impl I2c for MockSccb {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        if address != OV2640_SCCB_ADDR {
            return Err(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if state.nacks_pending > 0 {
            state.nacks_pending -= 1;
            return Err(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
        }
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    if let Some(&reg) = bytes.first() {
                        state.pointer = reg;
                    }
                    if let Some(&value) = bytes.get(1) {
                        let reg = state.pointer;
                        if reg == 0xFF {
                            state.bank = value;
                        } else {
                            let bank = state.bank;
                            state.regs.insert((bank, reg), value);
                        }
                        state.writes += 1;
                    }
                }
                Operation::Read(buffer) => {
                    let key = (state.bank, state.pointer);
                    let value = state.regs.get(&key).copied().unwrap_or(0);
                    buffer.iter_mut().for_each(|b| *b = value);
                }
            }
        }
        Ok(())
    }
}

/// 何もしない遅延 (要求された合計時間を記録する)
#[derive(Debug, Default)]
pub struct NoopDelay {
    elapsed_ns: u64,
}

impl NoopDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

/// When [`MockTransport`] reports a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPolicy {
    Never,
    /// Every query reports a stop
    Always,
    /// Stop once this many bytes have been received
    AfterBytes(usize),
}

#[derive(Debug)]
struct TransportState {
    starts_pending: u32,
    stop_once: bool,
    stop_policy: StopPolicy,
    sent: Vec<u8>,
    start_queries: u32,
    stop_queries: u32,
}

/// テスト用のトランスポート
///
/// 開始要求をキューに積み、停止要求はポリシーで制御します。
/// 送信されたバイトはすべて記録されます。
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Arc<Mutex<TransportState>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(TransportState {
                starts_pending: 0,
                stop_once: false,
                stop_policy: StopPolicy::Never,
                sent: Vec::new(),
                start_queries: 0,
                stop_queries: 0,
            })),
        }
    }

    /// テスト用: 開始要求を1回分キューに追加
    pub fn queue_start(&self) {
        self.state.lock().unwrap().starts_pending += 1;
    }

    /// テスト用: 次の停止問い合わせで一度だけ停止を返す
    pub fn request_stop(&self) {
        self.state.lock().unwrap().stop_once = true;
    }

    pub fn set_stop_policy(&self, policy: StopPolicy) {
        self.state.lock().unwrap().stop_policy = policy;
    }

    pub fn sent_bytes(&self) -> Vec<u8> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sent_len(&self) -> usize {
        self.state.lock().unwrap().sent.len()
    }

    pub fn clear_sent(&self) {
        self.state.lock().unwrap().sent.clear();
    }

    pub fn start_queries(&self) -> u32 {
        self.state.lock().unwrap().start_queries
    }

    pub fn stop_queries(&self) -> u32 {
        self.state.lock().unwrap().stop_queries
    }
}

impl Transport for MockTransport {
    fn got_start_request(&mut self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.start_queries += 1;
        if state.starts_pending > 0 {
            state.starts_pending -= 1;
            true
        } else {
            false
        }
    }

    fn got_stop_request(&mut self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.stop_queries += 1;
        if state.stop_once {
            state.stop_once = false;
            return true;
        }
        match state.stop_policy {
            StopPolicy::Never => false,
            StopPolicy::Always => true,
            StopPolicy::AfterBytes(n) => state.sent.len() >= n,
        }
    }

    fn send_byte(&mut self, byte: u8) {
        self.state.lock().unwrap().sent.push(byte);
    }
}

/// テスト用のシリアルポート (受信キューと送信記録)
#[derive(Debug, Clone, Default)]
pub struct MockSerialPort {
    rx: Arc<Mutex<VecDeque<u8>>>,
    tx: Arc<Mutex<Vec<u8>>>,
}

impl MockSerialPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: ホストからのバイトを受信キューに追加
    pub fn push_rx(&self, byte: u8) {
        self.rx.lock().unwrap().push_back(byte);
    }

    pub fn pending_rx(&self) -> usize {
        self.rx.lock().unwrap().len()
    }

    pub fn written(&self) -> Vec<u8> {
        self.tx.lock().unwrap().clone()
    }
}

impl SerialPort for MockSerialPort {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.lock().unwrap().pop_front()
    }

    fn write_byte(&mut self, byte: u8) {
        self.tx.lock().unwrap().push(byte);
    }
}

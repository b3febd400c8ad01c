//! 测试用的端口模拟实现

use std::collections::HashMap;

use crate::port::{AnalogPort, BusPort, ChannelSpec};
use crate::report::{CompensatedReading, Reporter, render_lines};

/// 以寄存器表为后端的总线端口模拟对象
pub struct MockBus {
    /// 就绪探测的返回值
    pub ready: bool,
    /// (设备地址, 寄存器地址) -> 寄存器内容
    regs: HashMap<(u8, u8), u8>,
    /// 读取会失败的寄存器
    failing_reads: Vec<(u8, u8)>,
    /// 写入会失败的寄存器
    failing_writes: Vec<(u8, u8)>,
    /// 记录的全部写操作
    pub writes: Vec<(u8, u8, u8)>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            ready: true,
            regs: HashMap::new(),
            failing_reads: Vec::new(),
            failing_writes: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// 设置寄存器内容
    pub fn set(&mut self, device_addr: u8, reg_addr: u8, value: u8) {
        self.regs.insert((device_addr, reg_addr), value);
    }

    /// 让指定寄存器的读取失败
    pub fn fail_read(&mut self, device_addr: u8, reg_addr: u8) {
        self.failing_reads.push((device_addr, reg_addr));
    }

    /// 让指定寄存器的写入失败
    pub fn fail_write(&mut self, device_addr: u8, reg_addr: u8) {
        self.failing_writes.push((device_addr, reg_addr));
    }
}

impl BusPort for MockBus {
    fn is_ready(&mut self, _device_addr: u8) -> bool {
        self.ready
    }

    fn read_register(&mut self, device_addr: u8, reg_addr: u8) -> anyhow::Result<u8> {
        if self.failing_reads.contains(&(device_addr, reg_addr)) {
            return Err(anyhow::anyhow!("读取寄存器0x{:02X}失败", reg_addr));
        }
        self.regs
            .get(&(device_addr, reg_addr))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("寄存器0x{:02X}未定义", reg_addr))
    }

    fn write_register(&mut self, device_addr: u8, reg_addr: u8, value: u8) -> anyhow::Result<()> {
        if self.failing_writes.contains(&(device_addr, reg_addr)) {
            return Err(anyhow::anyhow!("写入寄存器0x{:02X}失败", reg_addr));
        }
        self.writes.push((device_addr, reg_addr, value));
        // OK
        Ok(())
    }

    fn burst_read(&mut self, device_addr: u8, reg_addr: u8, buf: &mut [u8]) -> anyhow::Result<()> {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_register(device_addr, reg_addr + i as u8)?;
        }
        // OK
        Ok(())
    }
}

/// 模拟量采集端口的模拟对象
pub struct MockAnalog {
    /// 就绪探测的返回值
    pub ready: bool,
    /// 通道编号 -> 触发转换返回的转换缓冲区值
    codes: HashMap<u8, u16>,
    /// 配置会失败的通道
    failing_setup: Vec<u8>,
    /// 触发会失败的通道
    failing_trigger: Vec<u8>,
    /// 不支持毫伏换算的通道
    unsupported: Vec<u8>,
}

impl MockAnalog {
    pub fn new() -> Self {
        Self {
            ready: true,
            codes: HashMap::new(),
            failing_setup: Vec::new(),
            failing_trigger: Vec::new(),
            unsupported: Vec::new(),
        }
    }

    /// 设置通道的转换结果
    pub fn set_code(&mut self, channel: u8, code: u16) {
        self.codes.insert(channel, code);
    }

    /// 让指定通道的配置失败
    pub fn fail_setup(&mut self, channel: u8) {
        self.failing_setup.push(channel);
    }

    /// 让指定通道的触发转换失败
    pub fn fail_trigger(&mut self, channel: u8) {
        self.failing_trigger.push(channel);
    }

    /// 让指定通道不支持毫伏换算
    pub fn unsupported_millivolts(&mut self, channel: u8) {
        self.unsupported.push(channel);
    }
}

impl AnalogPort for MockAnalog {
    fn is_ready(&mut self, _spec: &ChannelSpec) -> bool {
        self.ready
    }

    fn setup(&mut self, spec: &ChannelSpec) -> anyhow::Result<()> {
        if self.failing_setup.contains(&spec.channel) {
            return Err(anyhow::anyhow!("通道{}配置失败", spec.channel));
        }
        // OK
        Ok(())
    }

    fn trigger(&mut self, spec: &ChannelSpec) -> anyhow::Result<u16> {
        if self.failing_trigger.contains(&spec.channel) {
            return Err(anyhow::anyhow!("通道{}转换失败", spec.channel));
        }
        self.codes
            .get(&spec.channel)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("通道{}未定义转换结果", spec.channel))
    }

    fn to_millivolts(&mut self, spec: &ChannelSpec, raw: i32) -> Option<i32> {
        if self.unsupported.contains(&spec.channel) {
            return None;
        }
        // 测试用的固定换算比例
        Some((raw * 5) / 8)
    }
}

/// 把全部输出收集到内存里的文本端口
pub struct CaptureReporter {
    /// 渲染出的全部文本行
    pub lines: Vec<String>,
    /// 全部失败诊断信息
    pub failures: Vec<String>,
    /// 每个周期的读数
    pub readings: Vec<CompensatedReading>,
}

impl CaptureReporter {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            failures: Vec::new(),
            readings: Vec::new(),
        }
    }
}

impl Reporter for CaptureReporter {
    fn cycle_start(&mut self) {}

    fn report(&mut self, reading: &CompensatedReading) {
        self.lines.extend(render_lines(reading));
        self.readings.push(reading.clone());
    }

    fn failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}

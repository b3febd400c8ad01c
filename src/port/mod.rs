//! 硬件端口接口定义
//!
//! 采集调度器只依赖这里的两个trait，不关心底层是树莓派的I2C外设
//! 还是测试用的模拟对象。

pub mod ads1115;
pub mod i2c;

/// 一路模拟输入通道的描述信息
///
/// 由程序入口构建，进程生命周期内不变。
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    /// 通道编号（对应转换芯片的输入引脚）
    pub channel: u8,
    /// 是否为差分模式
    /// - 差分模式下转换结果按16位二进制补码解释
    pub differential: bool,
}

/// 共享两线总线端口
///
/// 提供单寄存器读写与多字节连续读取；总线为半双工共享介质，
/// 全部操作由采集循环独占串行使用。
pub trait BusPort {
    /// 检查从设备是否就绪
    fn is_ready(&mut self, device_addr: u8) -> bool;

    /// 读取单个寄存器
    fn read_register(&mut self, device_addr: u8, reg_addr: u8) -> anyhow::Result<u8>;

    /// 写入单个寄存器
    fn write_register(&mut self, device_addr: u8, reg_addr: u8, value: u8) -> anyhow::Result<()>;

    /// 从起始寄存器开始连续读取多个字节
    fn burst_read(&mut self, device_addr: u8, reg_addr: u8, buf: &mut [u8]) -> anyhow::Result<()>;
}

/// 模拟量采集端口
///
/// 提供通道配置、触发一次转换与原始码到毫伏值的换算；
/// 换算可能不被支持（返回[`None`]），这不是错误。
pub trait AnalogPort {
    /// 检查转换设备是否就绪
    fn is_ready(&mut self, spec: &ChannelSpec) -> bool;

    /// 配置一路模拟输入通道
    fn setup(&mut self, spec: &ChannelSpec) -> anyhow::Result<()>;

    /// 触发一次转换并返回16位转换缓冲区的值
    fn trigger(&mut self, spec: &ChannelSpec) -> anyhow::Result<u16>;

    /// 把组装后的原始码换算为毫伏值，不支持换算时返回[`None`]
    fn to_millivolts(&mut self, spec: &ChannelSpec, raw: i32) -> Option<i32>;
}

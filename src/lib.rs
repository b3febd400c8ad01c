//! 树莓派土壤湿度与环境监测固件库
//!
//! 周期性地通过共享I2C总线采集土壤湿度（模拟量）、温度、相对湿度
//! 与环境光传感器，使用厂商定点补偿公式把寄存器原始码换算为物理
//! 单位后输出文本行。
//!
//! # 结构
//! - [`port`]: 总线端口与模拟量端口的接口定义及生产实现
//! - [`sensor`]: 各传感器的寄存器访问、原始码组装与补偿运算
//! - [`acquisition`]: 采集调度器（一次初始化 + 固定间隔的采集循环）
//! - [`report`]: 读数的文本行渲染与输出

pub mod acquisition;
pub mod port;
pub mod report;
pub mod sensor;

#[cfg(test)]
pub mod testutil;

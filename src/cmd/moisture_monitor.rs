use std::time::Duration;

use raspi_svf::{
    acquisition::{AcquisitionConfig, Scheduler},
    port::{ChannelSpec, ads1115::Ads1115Port, i2c::I2cPort},
    report::StdoutReporter,
};
use rppal::i2c::I2c;

/// 土壤湿度传感器接入的ADS1115通道
const MOISTURE_CHANNELS: [u8; 2] = [0, 1];
/// 单传感器板变体的采集周期间隔
const CYCLE_INTERVAL: Duration = Duration::from_millis(1000);

/// 土壤湿度监测程序（单传感器板变体，只采集模拟通道）
fn main() -> anyhow::Result<()> {
    // 未装配环境传感器，总线端口仅为调度器持有
    let bus = I2cPort::new(I2c::new()?);
    let adc = Ads1115Port::new(I2c::new()?, None);

    // 模拟输入通道配置
    let channels = MOISTURE_CHANNELS
        .iter()
        .map(|&channel| ChannelSpec {
            channel,
            differential: false,
        })
        .collect();

    // 初始化采集调度器，任何一步失败都直接退出且不产生读数
    let scheduler = Scheduler::init(
        bus,
        adc,
        StdoutReporter::new("ADC reading:"),
        AcquisitionConfig {
            channels,
            cycle_interval: CYCLE_INTERVAL,
            with_environment: false,
        },
    )?;

    // 进入采集循环，永不返回
    scheduler.run()
}

use std::time::Duration;

use raspi_svf::{
    acquisition::{AcquisitionConfig, Scheduler},
    port::{ChannelSpec, ads1115::Ads1115Port, i2c::I2cPort},
    report::StdoutReporter,
};
use rppal::i2c::I2c;

/// 土壤湿度传感器接入的ADS1115通道
const MOISTURE_CHANNEL: u8 = 0;
/// 组合板变体的采集周期间隔
const CYCLE_INTERVAL: Duration = Duration::from_millis(3000);

/// 垂直农业环境与土壤监测程序
///
/// BME680（温度、湿度）+ VEML7700（光照）+ ADS1115（土壤湿度）。
fn main() -> anyhow::Result<()> {
    // 环境传感器与转换芯片各持有一个I2C句柄，采集循环内串行使用
    let bus = I2cPort::new(I2c::new()?);
    let adc = Ads1115Port::new(I2c::new()?, None);

    // 模拟输入通道配置
    let channels = vec![ChannelSpec {
        channel: MOISTURE_CHANNEL,
        differential: false,
    }];

    // 初始化采集调度器，任何一步失败都直接退出且不产生读数
    let scheduler = Scheduler::init(
        bus,
        adc,
        StdoutReporter::new("Smart Vertical Farming System working...\n"),
        AcquisitionConfig {
            channels,
            cycle_interval: CYCLE_INTERVAL,
            with_environment: true,
        },
    )?;

    println!("I2C: BME 680, VEML 7700");

    // 进入采集循环，永不返回
    scheduler.run()
}

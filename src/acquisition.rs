//! 采集调度器
//!
//! 初始化一次（任何失败都中止启动，不产生任何读数），之后进入
//! 固定间隔的采集循环；运行阶段的失败只跳过对应物理量或通道，
//! 周期继续。

use std::{thread, time::Duration};

use crate::{
    port::{AnalogPort, BusPort, ChannelSpec},
    report::{ChannelReading, CompensatedReading, Reporter},
    sensor::{
        bme680::{self, Bme680},
        moisture,
        veml7700::{self, Veml7700},
    },
};

/// 采集调度配置
#[derive(Debug, Clone)]
pub struct AcquisitionConfig {
    /// 模拟输入通道列表
    pub channels: Vec<ChannelSpec>,
    /// 两个采集周期之间的固定休眠间隔
    pub cycle_interval: Duration,
    /// 是否装配了环境传感器（BME680 + VEML7700）
    pub with_environment: bool,
}

/// 环境传感器组合
struct Environment {
    /// 温度湿度传感器
    bme680: Bme680,
    /// 环境光传感器
    veml7700: Veml7700,
}

/// 采集调度器
///
/// 独占持有总线端口、模拟端口与输出端口；总线为半双工共享介质，
/// 单个协作循环内全部操作串行执行，周期之间的休眠是唯一的挂起点。
pub struct Scheduler<B, A, R> {
    /// 共享两线总线端口
    bus: B,
    /// 模拟量采集端口
    adc: A,
    /// 文本输出端口
    reporter: R,
    /// 环境传感器（未装配时为None）
    env: Option<Environment>,
    /// 模拟输入通道列表
    channels: Vec<ChannelSpec>,
    /// 周期间隔
    cycle_interval: Duration,
}

impl<B: BusPort, A: AnalogPort, R: Reporter> Scheduler<B, A, R> {
    /// 初始化采集调度器
    ///
    /// 依次完成每个模拟通道的就绪检查与配置、环境传感器固定校准
    /// 参数的加载；任何一步失败都立即返回错误，调用方中止启动。
    pub fn init(
        mut bus: B,
        mut adc: A,
        reporter: R,
        config: AcquisitionConfig,
    ) -> anyhow::Result<Self> {
        // 逐个检查并配置模拟通道
        for (i, spec) in config.channels.iter().enumerate() {
            if !adc.is_ready(spec) {
                return Err(anyhow::anyhow!("ADC controller device not ready"));
            }
            if let Err(err) = adc.setup(spec) {
                return Err(anyhow::anyhow!("Could not setup channel #{} ({})", i, err));
            }
        }

        // 加载环境传感器的固定校准参数
        let env = if config.with_environment {
            let bme680 = Bme680::new(&mut bus, None)?;
            Some(Environment {
                bme680,
                veml7700: Veml7700::new(None),
            })
        } else {
            None
        };

        // OK
        Ok(Self {
            bus,
            adc,
            reporter,
            env,
            channels: config.channels,
            cycle_interval: config.cycle_interval,
        })
    }

    /// 进入采集循环
    ///
    /// 除进程被宿主终止外没有可到达的终止状态。
    pub fn run(mut self) -> ! {
        loop {
            self.reporter.cycle_start();
            self.run_cycle();
            // 周期之间的固定休眠
            thread::sleep(self.cycle_interval);
        }
    }

    /// 执行一个采集周期
    pub fn run_cycle(&mut self) {
        let mut reading = CompensatedReading::default();

        // 环境传感器：温度补偿必须先于湿度补偿完成，湿度补偿消费
        // 温度的缩放值
        if let Some(env) = &mut self.env {
            // 触发一次强制测量（写失败时记录后继续，读数可能来自
            // 上一次转换）
            if let Err(err) = env.bme680.trigger_measurement(&mut self.bus) {
                self.reporter.failure(&format!("启动强制测量失败: {}", err));
            }

            // 温度
            let temp_scaled = match env.bme680.read_temperature_raw(&mut self.bus) {
                Ok(raw) => {
                    let calib = env.bme680.calibration();
                    let centi = bme680::compensate::temperature(
                        raw,
                        calib.t1 as i32,
                        calib.t2 as i32,
                        calib.t3 as i32,
                    );
                    reading.temperature = Some(centi);
                    // 整数摄氏度缩放值
                    Some(centi / 100)
                }
                Err(err) => {
                    self.reporter.failure(&format!("读取温度寄存器失败: {}", err));
                    None
                }
            };

            // 湿度：依赖温度缩放值；刷新h1、h2或读取原始码失败都
            // 只跳过本周期的湿度输出
            if let Some(ts) = temp_scaled {
                match env.bme680.refresh_variable_calibration(&mut self.bus) {
                    Ok(()) => match env.bme680.read_humidity_raw(&mut self.bus) {
                        Ok(raw) => {
                            let c = env.bme680.calibration();
                            reading.humidity = Some(bme680::compensate::humidity(
                                ts,
                                raw,
                                c.h1 as i32,
                                c.h2 as i32,
                                c.h3 as i32,
                                c.h4 as i32,
                                c.h5 as i32,
                                c.h6 as i32,
                                c.h7 as i32,
                            ));
                        }
                        Err(err) => {
                            self.reporter.failure(&format!("读取湿度寄存器失败: {}", err));
                        }
                    },
                    Err(err) => {
                        self.reporter
                            .failure(&format!("刷新湿度校准参数失败: {}", err));
                    }
                }
            }

            // 光照：模式命令写失败时记录后仍尝试读取
            if env.veml7700.power_on(&mut self.bus).is_err() {
                self.reporter.failure("Failed to write command to VEML7700");
            }
            match env.veml7700.read_raw(&mut self.bus) {
                Ok(raw) => reading.light = Some(veml7700::decode(raw)),
                Err(err) => self.reporter.failure(&format!("读取光照数据失败: {}", err)),
            }
        }

        // 模拟通道：单个通道失败只跳过该通道
        for spec in &self.channels {
            match self.adc.trigger(spec) {
                Ok(code) => {
                    let raw = moisture::assemble_analog_raw(code, spec.differential);
                    reading.channels.push(ChannelReading {
                        channel: spec.channel,
                        moisture_index: moisture::transform(raw),
                        millivolts: self.adc.to_millivolts(spec, raw),
                    });
                }
                Err(err) => self.reporter.failure(&format!("Could not read ({})", err)),
            }
        }

        // 渲染本周期读数
        self.reporter.report(&reading);
    }
}

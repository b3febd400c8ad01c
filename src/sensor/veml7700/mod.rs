use crate::port::BusPort;

/// VEML7700默认I2C从设备地址
pub const I2C_ADDR: u8 = 0x10;

/// 配置命令寄存器
const ALS_CONF: u8 = 0x00;
/// 上电、默认增益与积分时间的配置值
const ALS_CONF_POWER_ON: u8 = 0x00;
/// 高分辨率光照输出数据寄存器（连续读取2字节）
const ALS_OUTPUT: u8 = 0x04;

/// VEML7700环境光传感器封装对象
///
/// 自然光照条件的典型勒克斯值：
/// - 直射阳光     32,000 ~ 100,000
/// - 白天环境光   10,000 ~ 25,000
/// - 阴天白天     1000
/// - 日出日落     400
/// - 满月夜晚     1
pub struct Veml7700 {
    /// I2C从设备地址
    i2c_addr: u8,
}

impl Veml7700 {
    /// 创建传感器实例
    pub fn new(i2c_addr: Option<u8>) -> Self {
        Self {
            i2c_addr: i2c_addr.unwrap_or(I2C_ADDR),
        }
    }

    /// 写入工作模式命令
    ///
    /// 写入失败时调用方记录诊断后仍可尝试读取，传感器此时可能
    /// 保持上一次的工作状态。
    pub fn power_on<B: BusPort>(&self, bus: &mut B) -> anyhow::Result<()> {
        bus.write_register(self.i2c_addr, ALS_CONF, ALS_CONF_POWER_ON)
    }

    /// 连续读取2字节并组装光照原始码
    pub fn read_raw<B: BusPort>(&self, bus: &mut B) -> anyhow::Result<i16> {
        let mut data = [0u8; 2];
        bus.burst_read(self.i2c_addr, ALS_OUTPUT, &mut data)?;
        // OK
        Ok(assemble_light_raw(data))
    }
}

/// 把2字节连续读取结果组装为16位光照原始码（低字节在前）
pub fn assemble_light_raw(bytes: [u8; 2]) -> i16 {
    (((bytes[1] as u16) << 8) | (bytes[0] as u16)) as i16
}

/// 光照解码：原始码按原样作为报告值输出，不做勒克斯标度换算
pub fn decode(raw: i16) -> i16 {
    raw
}

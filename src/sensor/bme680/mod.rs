pub mod compensate;

use crate::port::BusPort;

/// BME680默认I2C从设备地址
pub const I2C_ADDR: u8 = 0x77;

// 温度校准寄存器
/// 温度校准参数t1低字节
const PAR_T1_LSB: u8 = 0xE9;
/// 温度校准参数t1高字节
const PAR_T1_MSB: u8 = 0xEA;
/// 温度校准参数t2低字节
const PAR_T2_LSB: u8 = 0x8A;
/// 温度校准参数t2高字节
const PAR_T2_MSB: u8 = 0x8B;
/// 温度校准参数t3
const PAR_T3: u8 = 0x8C;

// 湿度校准寄存器
/// 湿度校准参数h1低字节（每个采集周期重读）
const PAR_H1_LSB: u8 = 0xE2;
/// 湿度校准参数h2低字节（与h1低字节共用同一地址，每个采集周期重读）
const PAR_H2_LSB: u8 = 0xE2;
/// 湿度校准参数h1高字节（启动时读取一次）
const PAR_H1_MSB: u8 = 0xE3;
/// 湿度校准参数h2高字节（启动时读取一次）
const PAR_H2_MSB: u8 = 0xE1;
/// 湿度校准参数h3
const PAR_H3: u8 = 0xE4;
/// 湿度校准参数h4
const PAR_H4: u8 = 0xE5;
/// 湿度校准参数h5
const PAR_H5: u8 = 0xE6;
/// 湿度校准参数h6
const PAR_H6: u8 = 0xE7;
/// 湿度校准参数h7
const PAR_H7: u8 = 0xE8;

/// 测量控制寄存器
const CTRL_MEAS: u8 = 0x74;
/// 强制测量命令（温度过采样x2 + force模式）
const FORCED_MODE: u8 = 0b010 << 5 | 0b01;

// 数据寄存器
/// 温度数据高字节
const TEMP_MSB: u8 = 0x22;
/// 温度数据低字节
const TEMP_LSB: u8 = 0x23;
/// 温度数据扩展低字节（高4位有效）
const TEMP_XLSB: u8 = 0x24;
/// 湿度数据高字节
const HUM_MSB: u8 = 0x25;
/// 湿度数据低字节
const HUM_LSB: u8 = 0x26;

/// BME680传感器校准参数集合
///
/// 温度参数与h3..h7在启动时读取一次后不再变化；h1、h2的低字节
/// 每个采集周期重读一次，高字节在启动时读取后保留。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CalibrationSet {
    /// 温度校准参数1（无符号16位，低字节在前）
    pub t1: u16,
    /// 温度校准参数2（有符号16位，低字节在前）
    pub t2: i16,
    /// 温度校准参数3（有符号8位）
    pub t3: i8,
    /// 湿度校准参数1（16位，低字节每周期刷新）
    pub h1: u16,
    /// 湿度校准参数2（16位，低字节每周期刷新）
    pub h2: u16,
    /// h1高字节（启动时读取）
    pub h1_msb: u8,
    /// h2高字节（启动时读取）
    pub h2_msb: u8,
    /// 湿度校准参数3（有符号8位）
    pub h3: i8,
    /// 湿度校准参数4（有符号8位）
    pub h4: i8,
    /// 湿度校准参数5（有符号8位）
    pub h5: i8,
    /// 湿度校准参数6（有符号8位）
    pub h6: i8,
    /// 湿度校准参数7（有符号8位）
    pub h7: i8,
}

/// BME680温度湿度传感器封装对象
pub struct Bme680 {
    /// I2C从设备地址
    i2c_addr: u8,
    /// 校准参数
    calib: CalibrationSet,
}

impl Bme680 {
    /// 创建传感器实例并读取固定校准参数
    ///
    /// 总线设备未就绪时返回错误，调用方应当中止启动流程。
    pub fn new<B: BusPort>(bus: &mut B, i2c_addr: Option<u8>) -> anyhow::Result<Self> {
        let i2c_addr = i2c_addr.unwrap_or(I2C_ADDR);

        // 检查总线设备是否就绪
        if !bus.is_ready(i2c_addr) {
            return Err(anyhow::anyhow!("I2C: Device driver not found."));
        }

        // 读取固定校准参数
        let calib = Self::load_fixed_calibration(bus, i2c_addr)?;

        // OK
        Ok(Self { i2c_addr, calib })
    }

    /// 读取启动后固定不变的校准参数
    ///
    /// h1、h2的低字节每个采集周期读取，此处只读取两者的高字节。
    fn load_fixed_calibration<B: BusPort>(
        bus: &mut B,
        i2c_addr: u8,
    ) -> anyhow::Result<CalibrationSet> {
        // 温度校准寄存器
        let t1_lsb = bus.read_register(i2c_addr, PAR_T1_LSB)?;
        let t1_msb = bus.read_register(i2c_addr, PAR_T1_MSB)?;
        let t2_lsb = bus.read_register(i2c_addr, PAR_T2_LSB)?;
        let t2_msb = bus.read_register(i2c_addr, PAR_T2_MSB)?;
        let t3 = bus.read_register(i2c_addr, PAR_T3)?;

        // 湿度校准寄存器
        let h1_msb = bus.read_register(i2c_addr, PAR_H1_MSB)?;
        let h2_msb = bus.read_register(i2c_addr, PAR_H2_MSB)?;
        let h3 = bus.read_register(i2c_addr, PAR_H3)?;
        let h4 = bus.read_register(i2c_addr, PAR_H4)?;
        let h5 = bus.read_register(i2c_addr, PAR_H5)?;
        let h6 = bus.read_register(i2c_addr, PAR_H6)?;
        let h7 = bus.read_register(i2c_addr, PAR_H7)?;

        // OK
        Ok(CalibrationSet {
            t1: u16::from_le_bytes([t1_lsb, t1_msb]),
            t2: i16::from_le_bytes([t2_lsb, t2_msb]),
            t3: t3 as i8,
            h1: 0,
            h2: 0,
            h1_msb,
            h2_msb,
            h3: h3 as i8,
            h4: h4 as i8,
            h5: h5 as i8,
            h6: h6 as i8,
            h7: h7 as i8,
        })
    }

    /// 当前校准参数集合
    pub fn calibration(&self) -> &CalibrationSet {
        &self.calib
    }

    /// 刷新每个周期变化的湿度校准参数h1、h2
    ///
    /// 必须在每次湿度补偿之前调用一次；失败时本周期跳过湿度输出，
    /// 已有的h1、h2保持不变。
    pub fn refresh_variable_calibration<B: BusPort>(&mut self, bus: &mut B) -> anyhow::Result<()> {
        let h1_lsb = bus.read_register(self.i2c_addr, PAR_H1_LSB)?;
        let h2_lsb = bus.read_register(self.i2c_addr, PAR_H2_LSB)?;
        self.calib.h1 = u16::from_le_bytes([h1_lsb, self.calib.h1_msb]);
        self.calib.h2 = u16::from_le_bytes([h2_lsb, self.calib.h2_msb]);
        // OK
        Ok(())
    }

    /// 发送强制测量命令，触发一次温度、湿度转换
    pub fn trigger_measurement<B: BusPort>(&self, bus: &mut B) -> anyhow::Result<()> {
        bus.write_register(self.i2c_addr, CTRL_MEAS, FORCED_MODE)
    }

    /// 读取并组装20位温度原始码
    pub fn read_temperature_raw<B: BusPort>(&self, bus: &mut B) -> anyhow::Result<u32> {
        let msb = bus.read_register(self.i2c_addr, TEMP_MSB)?;
        let lsb = bus.read_register(self.i2c_addr, TEMP_LSB)?;
        let xlsb = bus.read_register(self.i2c_addr, TEMP_XLSB)?;
        // OK
        Ok(assemble_temperature_raw([msb, lsb, xlsb]))
    }

    /// 读取并组装16位湿度原始码（低字节在前读取）
    pub fn read_humidity_raw<B: BusPort>(&self, bus: &mut B) -> anyhow::Result<u16> {
        let lsb = bus.read_register(self.i2c_addr, HUM_LSB)?;
        let msb = bus.read_register(self.i2c_addr, HUM_MSB)?;
        // OK
        Ok(assemble_humidity_raw([lsb, msb]))
    }
}

/// 把3个寄存器字节组装为20位无符号温度原始码
pub fn assemble_temperature_raw(bytes: [u8; 3]) -> u32 {
    ((bytes[0] as u32) << 12) | ((bytes[1] as u32) << 4) | ((bytes[2] as u32) >> 4)
}

/// 把低字节在前的2个寄存器字节组装为16位无符号湿度原始码
pub fn assemble_humidity_raw(bytes_lsb_msb: [u8; 2]) -> u16 {
    (bytes_lsb_msb[0] as u16) | ((bytes_lsb_msb[1] as u16) << 8)
}

use std::{thread, time::Duration};

use embedded_hal::i2c::I2c;

use super::{AnalogPort, ChannelSpec};

/// ADS1115默认I2C从设备地址（ADDR引脚接地）
pub const I2C_ADDR: u8 = 0x48;

/// 转换结果寄存器
const REG_CONVERSION: u8 = 0x00;
/// 配置寄存器
const REG_CONFIG: u8 = 0x01;

/// 单次转换启动位
const OS_SINGLE: u16 = 0x8000;
/// 量程±4.096V（1 LSB = 125µV）
const PGA_4096: u16 = 0x0200;
/// 单次转换模式
const MODE_SINGLE: u16 = 0x0100;
/// 数据速率128SPS
const DR_128SPS: u16 = 0x0080;
/// 禁用比较器
const COMP_DISABLE: u16 = 0x0003;

/// ADS1115模数转换芯片封装对象
///
/// 16位I2C接口ADC，支持4路单端输入或2对差分输入，土壤湿度传感器
/// 的模拟电压经由它转换为原始码。
pub struct Ads1115Port<I2C> {
    /// I2C通信句柄
    i2c: I2C,
    /// I2C从设备地址
    i2c_addr: u8,
}

impl<I2C: I2c> Ads1115Port<I2C> {
    /// 创建转换芯片端口实例
    pub fn new(i2c: I2C, i2c_addr: Option<u8>) -> Self {
        Self {
            i2c,
            i2c_addr: i2c_addr.unwrap_or(I2C_ADDR),
        }
    }

    /// 取回内部的I2C通信句柄
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// 根据通道描述计算配置寄存器的输入选择位
    ///
    /// 差分模式使用0b000..0b011（输入对），单端模式使用0b100..0b111
    /// （对地输入）。
    fn mux_bits(spec: &ChannelSpec) -> u16 {
        if spec.differential {
            (spec.channel as u16) << 12
        } else {
            (0b100 | spec.channel as u16) << 12
        }
    }
}

impl<I2C: I2c> AnalogPort for Ads1115Port<I2C> {
    fn is_ready(&mut self, _spec: &ChannelSpec) -> bool {
        // 读取配置寄存器探测芯片是否应答
        let mut data = [0u8; 2];
        self.i2c
            .write_read(self.i2c_addr, &[REG_CONFIG], &mut data)
            .is_ok()
    }

    fn setup(&mut self, spec: &ChannelSpec) -> anyhow::Result<()> {
        // 芯片只有4路输入
        if spec.channel > 3 {
            return Err(anyhow::anyhow!("通道编号{}超出ADS1115支持范围", spec.channel));
        }
        // OK
        Ok(())
    }

    fn trigger(&mut self, spec: &ChannelSpec) -> anyhow::Result<u16> {
        // 写入配置寄存器启动一次转换
        let config =
            OS_SINGLE | Self::mux_bits(spec) | PGA_4096 | MODE_SINGLE | DR_128SPS | COMP_DISABLE;
        let bytes = config.to_be_bytes();
        self.i2c
            .write(self.i2c_addr, &[REG_CONFIG, bytes[0], bytes[1]])
            .map_err(|err| anyhow::anyhow!("启动ADS1115转换失败: {:?}", err))?;

        // 128SPS下单次转换约8ms
        thread::sleep(Duration::from_millis(10));

        // 读取16位转换结果（大端序）
        let mut data = [0u8; 2];
        self.i2c
            .write_read(self.i2c_addr, &[REG_CONVERSION], &mut data)
            .map_err(|err| anyhow::anyhow!("读取ADS1115转换结果失败: {:?}", err))?;
        // OK
        Ok(u16::from_be_bytes(data))
    }

    fn to_millivolts(&mut self, _spec: &ChannelSpec, raw: i32) -> Option<i32> {
        // ±4.096V量程下1 LSB = 125µV
        Some((raw * 125) / 1000)
    }
}

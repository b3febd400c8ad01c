use embedded_hal::i2c::I2c;

use super::BusPort;

/// 基于embedded-hal I2C接口的总线端口适配器
///
/// 生产环境传入rppal的I2c句柄（启用"hal"特性后实现了embedded-hal
/// 的I2c trait），测试环境可传入任意实现同一trait的模拟对象。
pub struct I2cPort<I2C> {
    /// I2C通信句柄
    i2c: I2C,
}

impl<I2C: I2c> I2cPort<I2C> {
    /// 创建总线端口实例
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// 取回内部的I2C通信句柄
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> BusPort for I2cPort<I2C> {
    fn is_ready(&mut self, device_addr: u8) -> bool {
        // 发送空写操作探测从设备是否应答
        self.i2c.write(device_addr, &[]).is_ok()
    }

    fn read_register(&mut self, device_addr: u8, reg_addr: u8) -> anyhow::Result<u8> {
        let mut data = [0u8; 1];
        self.i2c
            .write_read(device_addr, &[reg_addr], &mut data)
            .map_err(|err| anyhow::anyhow!("读取寄存器0x{:02X}失败: {:?}", reg_addr, err))?;
        // OK
        Ok(data[0])
    }

    fn write_register(&mut self, device_addr: u8, reg_addr: u8, value: u8) -> anyhow::Result<()> {
        self.i2c
            .write(device_addr, &[reg_addr, value])
            .map_err(|err| anyhow::anyhow!("写入寄存器0x{:02X}失败: {:?}", reg_addr, err))
    }

    fn burst_read(&mut self, device_addr: u8, reg_addr: u8, buf: &mut [u8]) -> anyhow::Result<()> {
        self.i2c
            .write_read(device_addr, &[reg_addr], buf)
            .map_err(|err| anyhow::anyhow!("连续读取寄存器0x{:02X}失败: {:?}", reg_addr, err))
    }
}

//! 采集读数的文本输出

/// 一个采集周期的全部物理量输出
///
/// 每个周期重新构建，不跨周期保留；为[`None`]的物理量表示本周期
/// 读取失败后被跳过。
#[derive(Debug, Default, Clone)]
pub struct CompensatedReading {
    /// 温度（0.01摄氏度）
    pub temperature: Option<i32>,
    /// 相对湿度（放大整数，除以10000为整数百分比）
    pub humidity: Option<i32>,
    /// 光照原始值
    pub light: Option<i16>,
    /// 各模拟通道的读数（读取失败的通道不在其中）
    pub channels: Vec<ChannelReading>,
}

/// 单个模拟通道的读数
#[derive(Debug, Clone)]
pub struct ChannelReading {
    /// 通道编号
    pub channel: u8,
    /// 土壤湿度指数
    pub moisture_index: i32,
    /// 毫伏值，端口不支持换算时为[`None`]
    pub millivolts: Option<i32>,
}

/// 文本输出端口
///
/// 把一个采集周期的读数渲染为文本行，并输出失败诊断信息。
pub trait Reporter {
    /// 输出周期起始横幅
    fn cycle_start(&mut self);

    /// 渲染一个周期的全部读数并输出周期分隔行
    fn report(&mut self, reading: &CompensatedReading);

    /// 输出一条失败诊断信息
    fn failure(&mut self, message: &str);
}

/// 周期分隔行
const SEPARATOR: &str = "------------------------------------";

/// 把一个周期的读数渲染为文本行序列
///
/// 行顺序固定：温度、湿度、光照、逐通道（毫伏行在前、湿度指数行
/// 在后），最后是周期分隔行。
pub fn render_lines(reading: &CompensatedReading) -> Vec<String> {
    let mut lines = Vec::new();

    // 温度显示整数摄氏度（0.01摄氏度值除以100）
    if let Some(centi) = reading.temperature {
        lines.push(format!("T: {} (degrees Celsius)", centi / 100));
    }
    // 湿度显示整数百分比（放大值除以10000）
    if let Some(scaled) = reading.humidity {
        lines.push(format!("H: {} (%)", scaled / 10000));
    }
    if let Some(light) = reading.light {
        lines.push(format!("L: {}", light));
    }
    for ch in &reading.channels {
        match ch.millivolts {
            Some(mv) => lines.push(format!("Raw data: {} (mV)", mv)),
            None => lines.push(" (value in mV not available)".to_string()),
        }
        lines.push(format!("M: {}", ch.moisture_index));
    }
    lines.push(SEPARATOR.to_string());
    // OK
    lines
}

/// 标准输出文本端口
///
/// 读数行写到标准输出，失败诊断写到标准错误。
pub struct StdoutReporter {
    /// 周期起始横幅文本
    banner: &'static str,
}

impl StdoutReporter {
    /// 创建标准输出端口实例
    pub fn new(banner: &'static str) -> Self {
        Self { banner }
    }
}

impl Reporter for StdoutReporter {
    fn cycle_start(&mut self) {
        println!("{}", self.banner);
    }

    fn report(&mut self, reading: &CompensatedReading) {
        for line in render_lines(reading) {
            println!("{}", line);
        }
    }

    fn failure(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

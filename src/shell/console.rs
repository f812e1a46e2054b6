use crate::utils::error::{Result, RosterError};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// 行導向的輸入輸出，數值輸入會重問直到合法
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// 讀一行並去除前後空白；輸入結束時回傳 `InputClosed`
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RosterError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn confirm(&mut self, text: &str) -> Result<bool> {
        Ok(self.prompt(text)?.eq_ignore_ascii_case("y"))
    }

    pub fn read_int(&mut self, text: &str, min: i64, max: i64) -> Result<i64> {
        let mut line = self.prompt(text)?;
        loop {
            match line.parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => {
                    line = self.prompt(&format!("输入超出范围 ({}-{})，请重新输入: ", min, max))?
                }
                Err(_) => line = self.prompt("无效输入，请输入整数: ")?,
            }
        }
    }

    pub fn read_f64(&mut self, text: &str, min: f64, max: f64) -> Result<f64> {
        let mut line = self.prompt(text)?;
        loop {
            match line.parse::<f64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => {
                    line = self.prompt(&format!(
                        "输入超出范围 ({:.1}-{:.1})，请重新输入: ",
                        min, max
                    ))?
                }
                Err(_) => line = self.prompt("无效输入，请输入数字: ")?,
            }
        }
    }

    /// 留空或輸入 -1 表示沿用 `current`
    pub fn read_int_or_keep(&mut self, text: &str, current: i64, min: i64, max: i64) -> Result<i64> {
        let mut line = self.prompt(text)?;
        loop {
            if line.is_empty() || line == "-1" {
                return Ok(current);
            }
            match line.parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => {
                    line = self.prompt(&format!(
                        "无效输入，请输入 {} 到 {} 之间的整数或 -1: ",
                        min, max
                    ))?
                }
                Err(_) => line = self.prompt("无效输入，请输入数字: ")?,
            }
        }
    }

    /// 留空表示沿用 `current`
    pub fn read_text_or_keep(&mut self, text: &str, current: &str) -> Result<String> {
        let line = self.prompt(text)?;
        Ok(if line.is_empty() {
            current.to_string()
        } else {
            line
        })
    }
}

use std::path::PathBuf;

use clap::Parser;
use disasm::Mode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct RawConfig {
    /// Decode 16-bit Thumb opcodes instead of 32-bit ARM ones
    #[arg(short, long, default_value_t = false)]
    thumb: bool,

    /// Address of the first opcode, hex with a 0x prefix or decimal
    #[arg(short, long, default_value = "0")]
    address: String,

    /// Raw little-endian code image to list
    #[arg(short, long, conflicts_with = "words")]
    file: Option<PathBuf>,

    /// Print the descriptors as JSON instead of text lines
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Opcodes in hex, e.g. `e1a00000` or `0x4770`
    words: Vec<String>,
}

/// Where the opcodes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Words given on the command line, already laid out little-endian.
    Image(Vec<u8>),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CleanConfig {
    pub mode: Mode,
    pub address: u32,
    pub input: Input,
    pub json: bool,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid address `{0}`")]
    Address(String),
    #[error("invalid opcode `{0}`")]
    Word(String),
    #[error("opcode `{0}` does not fit in a Thumb half-word")]
    ThumbWord(String),
    #[error("nothing to decode: pass opcodes or --file")]
    NoInput,
}

impl RawConfig {
    pub fn clean(self) -> Result<CleanConfig, ConfigError> {
        let mode = if self.thumb { Mode::Thumb } else { Mode::Arm };
        let address = parse_address(&self.address).ok_or(ConfigError::Address(self.address))?;

        let input = match self.file {
            Some(path) => Input::File(path),
            None if self.words.is_empty() => return Err(ConfigError::NoInput),
            None => Input::Image(encode_words(mode, &self.words)?),
        };

        Ok(CleanConfig {
            mode,
            address,
            input,
            json: self.json,
            log_file: self.log_file,
        })
    }
}

fn parse_address(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

fn parse_word(text: &str) -> Option<u32> {
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(hex, 16).ok()
}

fn encode_words(mode: Mode, words: &[String]) -> Result<Vec<u8>, ConfigError> {
    let mut image = Vec::with_capacity(words.len() * usize::from(mode.instruction_size()));

    for text in words {
        let word = parse_word(text).ok_or_else(|| ConfigError::Word(text.clone()))?;
        match mode {
            Mode::Arm => image.extend_from_slice(&word.to_le_bytes()),
            Mode::Thumb => {
                let half = u16::try_from(word).map_err(|_| ConfigError::ThumbWord(text.clone()))?;
                image.extend_from_slice(&half.to_le_bytes());
            }
        }
    }

    Ok(image)
}

mod logging;

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Result};

use logging::{DecodeEvent, EncodeEvent, LogEvent, ScanEvent, StructuredLogger};
use qraudio_core::config::{DecodeOptions, EncodeOptions, ScanOptions};
use qraudio_core::gzip_codec::GzipMode;
use qraudio_core::profile::Profile;
use qraudio_core::wav::{decode_wav, encode_wav, prepend_payload_to_wav, scan_wav, WavFormat};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliWavFormat {
    Pcm16,
    Float32,
}

impl From<CliWavFormat> for WavFormat {
    fn from(value: CliWavFormat) -> Self {
        match value {
            CliWavFormat::Pcm16 => WavFormat::Pcm16,
            CliWavFormat::Float32 => WavFormat::Float32,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliProfile {
    AfskBell,
    AfskFifth,
    GfskFifth,
    Mfsk,
}

impl From<CliProfile> for Profile {
    fn from(value: CliProfile) -> Self {
        match value {
            CliProfile::AfskBell => Profile::AfskBell,
            CliProfile::AfskFifth => Profile::AfskFifth,
            CliProfile::GfskFifth => Profile::GfskFifth,
            CliProfile::Mfsk => Profile::Mfsk,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qraudio", author, version, about = "JSON-over-audio modem", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a JSON payload to WAV.
    Encode {
        #[arg(long = "file")]
        payload_file: Option<PathBuf>,
        #[arg(long = "out")]
        out_path: Option<PathBuf>,
        #[arg(long)]
        profile: Option<CliProfile>,
        #[arg(long = "format", default_value = "pcm16")]
        wav_format: CliWavFormat,
        #[arg(long)]
        gzip: bool,
        #[arg(long = "no-fec")]
        no_fec: bool,
    },
    /// Decode a WAV file back to its JSON payload.
    Decode {
        #[arg(long = "in")]
        in_path: Option<PathBuf>,
        #[arg(long)]
        profile: Option<CliProfile>,
    },
    /// Scan a WAV file for every decodable payload.
    Scan {
        #[arg(long = "in")]
        in_path: Option<PathBuf>,
        #[arg(long)]
        profile: Option<CliProfile>,
    },
    /// Prepend an encoded payload onto an existing WAV file.
    Prepend {
        #[arg(long = "in", required = true)]
        in_path: PathBuf,
        #[arg(long = "file")]
        payload_file: Option<PathBuf>,
        #[arg(long = "out")]
        out_path: Option<PathBuf>,
        #[arg(long)]
        profile: Option<CliProfile>,
        #[arg(long = "format", default_value = "pcm16")]
        wav_format: CliWavFormat,
        #[arg(long = "pad-seconds", default_value_t = 0.25)]
        pad_seconds: f64,
        #[arg(long = "pre-pad-seconds")]
        pre_pad_seconds: Option<f64>,
        #[arg(long = "post-pad-seconds")]
        post_pad_seconds: Option<f64>,
        #[arg(long)]
        gzip: bool,
        #[arg(long = "no-fec")]
        no_fec: bool,
    },
}

fn read_json(path: &Option<PathBuf>) -> Result<serde_json::Value> {
    let data = match path {
        Some(p) => std::fs::read_to_string(p)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if data.is_empty() {
        return Err(eyre!("No JSON input provided"));
    }
    Ok(serde_json::from_str(&data)?)
}

fn read_wav(path: &Option<PathBuf>) -> Result<Vec<u8>> {
    let data = match path {
        Some(p) => std::fs::read(p)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    if data.is_empty() {
        return Err(eyre!("No WAV input provided"));
    }
    Ok(data)
}

fn write_wav(wav: &[u8], path: &Option<PathBuf>) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, wav)?,
        None => std::io::stdout().write_all(wav)?,
    }
    Ok(())
}

fn encode_options(profile: Option<CliProfile>, gzip: bool, no_fec: bool) -> EncodeOptions {
    let mut options = EncodeOptions::default();
    options.profile = profile.map(Profile::from);
    options.gzip = if gzip { GzipMode::On } else { GzipMode::Off };
    options.fec = !no_fec;
    options
}

fn run() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let mut logger = StructuredLogger::new();

    match cli.command {
        Command::Encode { payload_file, out_path, profile, wav_format, gzip, no_fec } => {
            let payload = read_json(&payload_file)?;
            let options = encode_options(profile, gzip, no_fec);
            let result = encode_wav(&payload, &options, wav_format.into())
                .map_err(|e| eyre!(e.to_string()))?;
            logger.log(LogEvent::Encode(EncodeEvent {
                timestamp: chrono::Utc::now(),
                profile: result.profile.as_str().to_string(),
                payload_bytes: result.payload_bytes,
                duration_ms: result.duration_ms,
            }))?;
            write_wav(&result.wav, &out_path)?;
        }
        Command::Decode { in_path, profile } => {
            let wav_bytes = read_wav(&in_path)?;
            let options = DecodeOptions { profile: profile.map(Profile::from), ..Default::default() };
            let decoded = decode_wav(&wav_bytes, &options).map_err(|e| eyre!(e.to_string()))?;
            logger.log(LogEvent::Decode(DecodeEvent {
                timestamp: chrono::Utc::now(),
                profile: decoded.profile.as_str().to_string(),
                confidence: decoded.confidence,
            }))?;
            print!("{}", serde_json::to_string(&decoded.json)?);
        }
        Command::Scan { in_path, profile } => {
            let wav_bytes = read_wav(&in_path)?;
            let options = ScanOptions { profile: profile.map(Profile::from), ..Default::default() };
            let results = scan_wav(&wav_bytes, &options).map_err(|e| eyre!(e.to_string()))?;
            logger.log(LogEvent::Scan(ScanEvent {
                timestamp: chrono::Utc::now(),
                frames_found: results.len(),
            }))?;
            let payloads: Vec<&serde_json::Value> = results.iter().map(|r| &r.json).collect();
            print!("{}", serde_json::to_string(&payloads)?);
        }
        Command::Prepend {
            in_path,
            payload_file,
            out_path,
            profile,
            wav_format,
            pad_seconds,
            pre_pad_seconds,
            post_pad_seconds,
            gzip,
            no_fec,
        } => {
            let wav_bytes = read_wav(&Some(in_path))?;
            let payload = read_json(&payload_file)?;
            let options = encode_options(profile, gzip, no_fec);
            let result = prepend_payload_to_wav(
                &wav_bytes,
                &payload,
                &options,
                pad_seconds,
                pre_pad_seconds,
                post_pad_seconds,
                wav_format.into(),
            )
            .map_err(|e| eyre!(e.to_string()))?;
            logger.log(LogEvent::Encode(EncodeEvent {
                timestamp: chrono::Utc::now(),
                profile: result.payload.profile.as_str().to_string(),
                payload_bytes: result.payload.payload_bytes,
                duration_ms: result.payload.duration_ms,
            }))?;
            write_wav(&result.wav, &out_path)?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

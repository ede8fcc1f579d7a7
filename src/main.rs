use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use nvimei::error::EXIT_USAGE;
use nvimei::utils::parse_offset;
use nvimei::{
    bruteforce_imei, device, read_imei, write_imei, Imei, NvImage, NvImeiError, OpenMode, Result,
};

const WARNING: &str = "\
/!\\ This tool is experimental, use at your own risk.

It writes blindly at whatever offset it is given, and nobody knows how to
recreate a valid nv_data.bin from scratch. Back up the image first.";

#[derive(Debug, Parser)]
#[command(name = "nvimei")]
#[command(version, about = "Read, write or locate the IMEI inside a modem nv_data.bin image")]
#[command(after_help = WARNING)]
struct Cli {
    /// nv_data.bin image to operate on
    image: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the current IMEI from nv_data
    ReadImei {
        /// Field offset, hex with 0x prefix or decimal
        #[arg(short, long, value_parser = parse_offset, default_value = "0xEC80")]
        offset: u64,
    },

    /// Store the given IMEI to nv_data (may or may not work)
    WriteImei {
        /// Field offset, hex with 0x prefix or decimal
        #[arg(short, long, value_parser = parse_offset)]
        offset: u64,

        /// 15-digit IMEI to store
        #[arg(short, long)]
        imei: String,
    },

    /// Find the IMEI offset in the nv_data with the given IMEI
    BruteforceImei {
        /// 15-digit IMEI to search for
        #[arg(short, long)]
        imei: String,
    },

    /// Display supported devices
    ListSupported,
}

fn require_image(image: Option<PathBuf>, command: &str) -> Result<PathBuf> {
    image.ok_or_else(|| {
        NvImeiError::Usage(format!(
            "the '{}' command needs a FILE argument, see 'nvimei {} -h'",
            command, command
        ))
    })
}

fn report_imei(imei: &Imei) -> String {
    format!("IMEI: {}", imei)
}

fn report_found(offset: u64) -> String {
    format!("Found IMEI at {:#x} ({})", offset, offset)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::ReadImei { offset } => {
            let path = require_image(cli.image, "read-imei")?;
            let mut image = NvImage::open(path, OpenMode::ReadOnly)?;
            let imei = read_imei(&mut image, offset)?;
            println!("{}", report_imei(&imei));
        }

        Commands::WriteImei { offset, imei } => {
            // Argument shape first (usage class), then IMEI validation,
            // both before the image is touched.
            let path = require_image(cli.image, "write-imei")?;
            let imei: Imei = imei.parse()?;
            let mut image = NvImage::open(path, OpenMode::ReadWrite)?;
            write_imei(&mut image, offset, &imei)?;
        }

        Commands::BruteforceImei { imei } => {
            let path = require_image(cli.image, "bruteforce-imei")?;
            let imei: Imei = imei.parse()?;
            let mut image = NvImage::open(path, OpenMode::ReadOnly)?;
            let offset = bruteforce_imei(&mut image, &imei)?;
            println!("{}", report_found(offset));
        }

        Commands::ListSupported => {
            if cli.image.is_some() {
                return Err(NvImeiError::Usage(
                    "the 'list-supported' command takes no FILE argument".to_string(),
                ));
            }
            println!("Supported devices:");
            for profile in device::SUPPORTED_DEVICES {
                println!(
                    "\t{} # {}, nv_data size {:#x}, IMEI offset {:#x}",
                    profile.name, profile.modem, profile.nv_data_size, profile.default_imei_offset
                );
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version are successful outcomes even when other
            // arguments would not have validated; everything else is a
            // usage error and must exit 64, not clap's default 2.
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_USAGE,
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("nvimei: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

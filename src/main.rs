use clap::{CommandFactory, ErrorKind, Parser};
use std::path::PathBuf;

mod color;
mod convert;
mod image;
mod raster;

use crate::convert::{convert_rasters, Format};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// Raw 8-bit input file, or a directory of .raw files
    #[clap(parse(try_from_str=file_exists))]
    input: PathBuf,

    /// Output image file, or output directory in batch mode
    output: PathBuf,

    /// Raster width in pixels
    #[clap(short = 'W', long, parse(try_from_str=parse_dimension))]
    width: u32,

    /// Raster height in pixels
    #[clap(short = 'H', long, parse(try_from_str=parse_dimension))]
    height: u32,

    /// Output image format
    #[clap(short = 'f', long, arg_enum, default_value = "bmp")]
    format: Format,

    /// Number of workers for batch conversion
    #[clap(short = 'w', long, default_value_t = 4)]
    workers: u8,
}

fn main() {
    let args = Cli::parse();

    if args.input.is_dir() && args.output.is_file() {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::ArgumentConflict,
            "output must be a directory when input is a directory",
        )
        .exit();
    }

    if args.workers == 0 {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, "workers must be greater than zero")
            .exit();
    }

    convert_rasters(
        &args.input,
        &args.output,
        args.width,
        args.height,
        args.format,
        args.workers,
    )
    .unwrap();
}

fn file_exists(s: &str) -> Result<PathBuf, String> {
    let mut path = PathBuf::new();
    path.push(s);

    if !path.exists() {
        return Err(String::from("path does not exist"));
    }
    Ok(path)
}

fn parse_dimension(s: &str) -> Result<u32, String> {
    let dim: u32 = s
        .parse()
        .map_err(|_| format!("`{}` isn't a valid number", s))?;
    if dim == 0 {
        return Err(String::from("must be greater than zero"));
    }
    return Ok(dim);
}

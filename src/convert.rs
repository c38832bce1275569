use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::ArgEnum;
use crossbeam::channel;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;

use crate::image::{BmpEncoder, Encode, PnmEncoder, PnmMode};
use crate::raster::Raster;

#[derive(ArgEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// 8-bit indexed BMP with the synthetic color table
    Bmp,
    /// Binary PNM grayscale (P5)
    Pgm,
    /// Binary PNM synthetic color (P6)
    Ppm,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Bmp => "bmp",
            Format::Pgm => "pgm",
            Format::Ppm => "ppm",
        }
    }

    fn encoder(&self, width: u32, height: u32) -> Box<dyn Encode> {
        match self {
            Format::Bmp => Box::new(BmpEncoder::new(width, height)),
            Format::Pgm => Box::new(PnmEncoder::new(width, height, PnmMode::Grayscale)),
            Format::Ppm => Box::new(PnmEncoder::new(width, height, PnmMode::Color)),
        }
    }
}

/// Convert one raw buffer file, or every .raw file in a directory, into
/// `format` images.
pub fn convert_rasters(
    input: &PathBuf,
    output: &PathBuf,
    width: u32,
    height: u32,
    format: Format,
    workers: u8,
) -> Result<()> {
    if input.is_dir() {
        convert_dir(input, output, width, height, format, workers)
    } else {
        convert_file(input, output, width, height, format)
    }
}

fn convert_file(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    format: Format,
) -> Result<()> {
    let pixels =
        fs::read(input).map_err(|e| anyhow!("could not read {}: {}", input.display(), e))?;
    let raster = Raster::new(&pixels, width, height)
        .map_err(|e| anyhow!("{}: {}", input.display(), e))?;

    format
        .encoder(raster.width(), raster.height())
        .write(raster.pixels(), output)
        .map_err(|e| anyhow!("could not write {}: {}", output.display(), e))?;

    Ok(())
}

/// Output file for `input`, in `output` with the format's extension.
fn output_path(output: &Path, input: &Path, format: Format) -> PathBuf {
    output
        .join(input.file_name().unwrap())
        .with_extension(format.extension())
}

fn convert_dir(
    input: &Path,
    output: &Path,
    width: u32,
    height: u32,
    format: Format,
    workers: u8,
) -> Result<()> {
    if !output.is_dir() {
        fs::create_dir_all(output)
            .map_err(|e| anyhow!("could not create {}: {}", output.display(), e))?;
    }

    let inputs: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "raw"))
        .sorted()
        .collect();

    if inputs.is_empty() {
        return Err(anyhow!("no .raw files in {}", input.display()));
    }

    println!(
        "converting {} rasters ({}x{}) to {}",
        inputs.len(),
        width,
        height,
        format.extension()
    );

    let bar = ProgressBar::new(inputs.len() as u64).with_style(
        ProgressStyle::default_bar().template("{bar:50} {pos}/{len} [elapsed: {elapsed_precise}]"),
    );

    let (snd, rcv) = channel::bounded(1);

    crossbeam::scope(|s| {
        // queue source files
        s.spawn(|_| {
            for path in inputs.iter() {
                snd.send(path.clone()).unwrap();
            }

            drop(snd);
        });

        let bar = &bar;
        for _ in 0..workers {
            let rcv = rcv.clone();

            s.spawn(move |_| {
                for path in rcv.iter() {
                    let out = output_path(output, &path, format);
                    convert_file(&path, &out, width, height, format).unwrap();
                    bar.inc(1);
                }
            });
        }
    })
    .unwrap();

    bar.finish();

    Ok(())
}

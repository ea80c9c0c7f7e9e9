use clap::Parser;
use log::debug;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tagpress::{Color, PipelineBuilder, PipelineError, RenderOptions};

/// Render inline-tagged text to a PDF page.
#[derive(Parser, Debug)]
#[command(name = "tagpress", version, about)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base font size in points
    #[arg(long)]
    font_size: Option<f32>,

    /// Distance between line baselines in points
    #[arg(long)]
    line_height: Option<f32>,

    /// Default text color as #RRGGBB
    #[arg(long, value_parser = Color::parse_hex)]
    color: Option<Color>,

    /// Installed font family to render with
    #[arg(long)]
    font_family: Option<String>,

    /// Directory the PDF is written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Document name used in the output file name
    #[arg(short, long)]
    name: Option<String>,

    /// Markup file to render; reads stdin when omitted
    input: Option<PathBuf>,
}

fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut builder = PipelineBuilder::new();
    if let Some(config) = &cli.config {
        builder = builder.with_config_file(config)?;
    }
    let pipeline = builder
        .with_options(RenderOptions {
            font_size: cli.font_size,
            line_height: cli.line_height,
            color: cli.color,
            font_family: cli.font_family,
            output_dir: cli.output_dir,
            document_name: cli.name,
            ..Default::default()
        })
        .build()?;

    let path = pipeline.render_to_file(&text)?;
    println!("{}", path.display());
    Ok(())
}

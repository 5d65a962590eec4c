use clap::{Parser, Subcommand, ValueEnum};
use gaussmap::blur::{BlurMode, blur_file};
use gaussmap::config::ToolSettings;
use gaussmap::heightmap::mesh_to_heightmap;
use gaussmap::plot::save_kernel_plot;
use gaussmap::sph::{Sample, SmoothingKernel, sample};
use serde::Serialize;
use std::path::PathBuf;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Гауссово размытие, карты высот из OBJ и графики ядер SPH
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Размыть первый канал изображения, результат — new_<имя>
    Gray {
        image: PathBuf,
        /// Число проходов (по умолчанию из конфигурации, иначе 1)
        passes: Option<u32>,
    },

    /// Размыть все три канала изображения
    Rgb { image: PathBuf, passes: Option<u32> },

    /// Построить карту высот по вершинам OBJ-файла
    Heightmap {
        obj: PathBuf,

        /// Путь для сохранения (по умолчанию: ./new_image.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Число проходов заполнения пустых ячеек
        #[arg(long)]
        passes: Option<u32>,
    },

    /// Построить график ядра сглаживания SPH
    Kernels {
        #[arg(value_enum)]
        kernel: KernelArg,

        /// Путь для PNG (по умолчанию: ./<ядро>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Вывести отсчёты в JSON вместо рисования
        #[arg(long)]
        json: bool,

        /// Наложить табличную кривую K₀
        #[arg(long)]
        reference: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KernelArg {
    Poly6,
    Spiky,
    Viscosity,
    Bessel,
}

impl From<KernelArg> for SmoothingKernel {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Poly6 => SmoothingKernel::Poly6,
            KernelArg::Spiky => SmoothingKernel::Spiky,
            KernelArg::Viscosity => SmoothingKernel::Viscosity,
            KernelArg::Bessel => SmoothingKernel::BesselSeries,
        }
    }
}

#[derive(Serialize)]
struct CurveDump {
    smoothing_length: f64,
    samples: Vec<Sample>,
}

#[derive(Serialize)]
struct KernelDump {
    kernel: SmoothingKernel,
    curves: Vec<CurveDump>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => {
            tracing::info!("Loading config: {}", path.display());
            ToolSettings::from_toml_file(path)?
        }
        None => ToolSettings::default(),
    };

    match cli.command {
        Commands::Gray { image, passes } => {
            run_blur(&image, BlurMode::Grayscale, passes, &mut settings)
        }
        Commands::Rgb { image, passes } => run_blur(&image, BlurMode::Rgb, passes, &mut settings),
        Commands::Heightmap {
            obj,
            output,
            passes,
        } => {
            if let Some(output) = output {
                settings.heightmap.output = output;
            }
            if let Some(passes) = passes {
                settings.heightmap.smoothing_passes = passes;
            }
            let heightmap = mesh_to_heightmap(&obj, &settings.heightmap)?;
            heightmap.save_as_png(&settings.heightmap.output)?;
            tracing::info!("Heightmap written to {}", settings.heightmap.output.display());
            Ok(())
        }
        Commands::Kernels {
            kernel,
            output,
            json,
            reference,
        } => run_kernels(kernel.into(), output, json, reference, &settings),
    }
}

fn run_blur(
    image: &std::path::Path,
    mode: BlurMode,
    passes: Option<u32>,
    settings: &mut ToolSettings,
) -> CliResult<()> {
    if let Some(passes) = passes {
        settings.blur.passes = passes;
    }
    let output = blur_file(image, mode, &settings.blur)?;
    tracing::info!("Results written to {}", output.display());
    Ok(())
}

fn run_kernels(
    kernel: SmoothingKernel,
    output: Option<PathBuf>,
    json: bool,
    reference: bool,
    settings: &ToolSettings,
) -> CliResult<()> {
    if json {
        let dump = KernelDump {
            kernel,
            curves: settings
                .plot
                .curves
                .iter()
                .map(|c| CurveDump {
                    smoothing_length: c.smoothing_length,
                    samples: sample(kernel, c.smoothing_length),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.png", kernel.name())));
    save_kernel_plot(kernel, &settings.plot, reference, &output)?;
    Ok(())
}

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use cobridge_batch::{write_batch_results, write_java_file, BatchConfig, JobStatus, SourceFile};
use cobridge_core::{telemetry, BridgeConfig, ConversionSession};
use std::path::{Path, PathBuf};

fn cli() -> Command {
    Command::new("cobridge")
        .version(cobridge_core::VERSION)
        .about("COBOL to Java translation with generated tests")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate one COBOL program to Java")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("COBOL source file"),
                )
                .arg(
                    Arg::new("story")
                        .long("story")
                        .default_value("")
                        .help("User story passed to the translator as context"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the Java source here instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("testgen")
                .about("Generate test cases for a COBOL program and its translation")
                .arg(
                    Arg::new("cobol")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("COBOL source file"),
                )
                .arg(
                    Arg::new("java")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Translated Java file"),
                )
                .arg(
                    Arg::new("junit")
                        .long("junit")
                        .action(ArgAction::SetTrue)
                        .help("Print a JUnit 5 class instead of the JSON cases"),
                ),
        )
        .subcommand(
            Command::new("analyze")
                .about("Compare a COBOL program with its translation")
                .arg(
                    Arg::new("cobol")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("COBOL source file"),
                )
                .arg(
                    Arg::new("java")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Translated Java file"),
                ),
        )
        .subcommand(
            Command::new("batch")
                .about("Translate many COBOL files in one queue run")
                .arg(
                    Arg::new("files")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("COBOL source files, processed in the given order"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory for .java files and batch-results.json"),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .value_parser(value_parser!(usize))
                        .help("Translations in flight at once (default from config, 1)"),
                )
                .arg(
                    Arg::new("story")
                        .long("story")
                        .help("User story attached to every job"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<BridgeConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => BridgeConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BridgeConfig::new(),
    };
    if matches.get_flag("json-logs") {
        config.logging.json = true;
    }
    Ok(config.with_env_overrides())
}

async fn read_source(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

fn required_path<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a PathBuf> {
    args.get_one::<PathBuf>(name)
        .with_context(|| format!("missing argument <{name}>"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let mut config = load_config(&matches)?;
    telemetry::init(&config.logging)?;

    match matches.subcommand() {
        Some(("translate", args)) => {
            let source = read_source(required_path(args, "file")?).await?;
            let story = args.get_one::<String>("story").map_or("", String::as_str);

            let session = ConversionSession::from_config(config)?;
            let translation = session.translate(&source, story).await?;

            match args.get_one::<PathBuf>("out") {
                Some(out) => tokio::fs::write(out, &translation.translated_code)
                    .await
                    .with_context(|| format!("writing {}", out.display()))?,
                None => println!("{}", translation.translated_code),
            }
        }
        Some(("testgen", args)) => {
            let cobol = read_source(required_path(args, "cobol")?).await?;
            let java = read_source(required_path(args, "java")?).await?;

            let session = ConversionSession::from_config(config)?;
            let generated = session.generate_tests(&cobol, &java).await;

            if args.get_flag("junit") {
                println!("{}", session.generate_junit(&java, &generated.cases).await);
            } else {
                println!("{}", serde_json::to_string_pretty(&generated.cases)?);
            }
        }
        Some(("analyze", args)) => {
            let cobol = read_source(required_path(args, "cobol")?).await?;
            let java = read_source(required_path(args, "java")?).await?;

            let session = ConversionSession::from_config(config)?;
            let analysis = session.analyze(&cobol, &java).await;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Some(("batch", args)) => {
            let mut batch: BatchConfig = config.batch.clone();
            if let Some(parallel) = args.get_one::<usize>("parallel") {
                batch = batch.with_max_parallel(*parallel);
            }
            if let Some(story) = args.get_one::<String>("story") {
                batch = batch.with_user_story(story);
            }
            config = config.with_batch(batch);

            let mut files = Vec::new();
            for path in args.get_many::<PathBuf>("files").into_iter().flatten() {
                files.push(SourceFile::read(path).await?);
            }

            let session = ConversionSession::from_config(config)?;
            let mut pipeline = session.batch_pipeline()?;
            pipeline.enqueue(files);
            let summary = pipeline.run_queue().await?;

            for job in pipeline.jobs() {
                match job.status() {
                    JobStatus::Failed => println!(
                        "{:<10} {} ({})",
                        job.status().name(),
                        job.file_name(),
                        job.error().unwrap_or_default()
                    ),
                    _ => println!("{:<10} {}", job.status().name(), job.file_name()),
                }
            }

            if let Some(dir) = args.get_one::<PathBuf>("out") {
                tokio::fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("creating {}", dir.display()))?;
                for job in pipeline.jobs() {
                    write_java_file(dir, job).await?;
                }
                write_batch_results(dir.join("batch-results.json"), pipeline.jobs()).await?;
            }

            println!("{}", serde_json::to_string_pretty(&pipeline.stats())?);
            if summary.failed > 0 {
                anyhow::bail!("{} of {} jobs failed", summary.failed, summary.processed);
            }
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}

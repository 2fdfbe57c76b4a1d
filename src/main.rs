use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    Command,
};
use colored::Colorize;
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root")
                .short('C')
                .long("root")
                .help("Project directory to scaffold")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML manifest overriding the built-in directories and templates")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Show what would be created without touching the filesystem")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logger(matches.get_flag("verbose"));

    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .expect("root has a default");

    let manifest = matches.get_one::<PathBuf>("config");

    let config = dappinit::load_config(manifest.map(PathBuf::as_path))?;

    if matches.get_flag("dry-run") {
        let plan = dappinit::plan(&root, &config)?;

        dappinit::preview::preview_as_tree(&plan, &root);

        return Ok(());
    }

    let summary = dappinit::scaffold(&root, &config)?;

    log::info!(
        "{} directories created, {} templates copied",
        summary.created_directories(),
        summary.copied_files()
    );

    println!("{} project structure created successfully", "✔".green());

    Ok(())
}

fn init_logger(is_verbose: bool) {
    let default_filter = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

mod cli;

use cli::{Command, GalleryConfig, OrganizeConfig};
use curio_core::{
    build_gallery_view, build_manifest, count_entries, default_manifest_path, organize, progress,
    write_gallery, write_manifest, Taxonomy,
};
use indicatif::ProgressBar;

fn main() {
    let command = Command::from_env().unwrap_or_else(|err| match err {
        cli::CliError::Help | cli::CliError::Version => {
            println!("{}", err);
            std::process::exit(0);
        }
        _ => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    });

    match command {
        Command::Organize(config) => run_organize(config),
        Command::Gallery(config) => run_gallery(config),
    }
}

fn run_organize(config: OrganizeConfig) {
    let taxonomy = Taxonomy::default();
    let total_entries = count_entries(&config.root);
    let progress_bar = ProgressBar::new(total_entries);
    progress_bar.set_style(progress::default_style());

    let report = organize(&config.root, &taxonomy, config.counter, &progress_bar);
    progress_bar.finish_with_message("Organize complete");

    for asset in &report.placed {
        println!("{} -> {}", asset.original_name, asset.destination.display());
    }
    for failure in &report.failures {
        eprintln!(
            "failed to place {} ({}): {}",
            failure.file_name, failure.category, failure.error
        );
    }
    for (category, count) in report.category_counts() {
        println!("{}: {}", category, count);
    }

    match build_manifest(&config.root, &taxonomy) {
        Ok(manifest) => {
            let output = default_manifest_path(&config.root);
            match write_manifest(&manifest, &output) {
                Ok(_) => println!(
                    "Manifest written to {} ({} assets)",
                    output.display(),
                    manifest.total()
                ),
                Err(error) => eprintln!("Error writing manifest: {}", error),
            }
        }
        Err(error) => eprintln!("Error building manifest: {}", error),
    }
}

fn run_gallery(config: GalleryConfig) {
    let taxonomy = Taxonomy::default();
    match build_gallery_view(&config.root, &taxonomy) {
        Ok(view) => match write_gallery(&view, &config.output) {
            Ok(_) => println!(
                "Gallery written to {} ({} images)",
                config.output.display(),
                view.total_count
            ),
            Err(error) => eprintln!("Error writing gallery: {}", error),
        },
        Err(error) => eprintln!("Error building gallery: {}", error),
    }
}

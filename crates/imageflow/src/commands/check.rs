use colored::Colorize;
use std::path::Path;

pub fn handle(project_path: Option<&Path>, image_name: &str) -> anyhow::Result<()> {
    let (path, project) = crate::project::load(project_path)?;
    tracing::debug!(path = %path.display(), image = image_name, "Checking image");

    let image = project.image(image_name)?;
    let builder = project.builder_for(image)?;
    let last_build = project.latest_build(image);

    println!("イメージ: {}", image.name().cyan());
    println!("  タグ: {}", image.spec.image);
    println!("  ソース: {}", image.spec.source);
    println!("  ビルダー: {} ({})", builder.name(), builder.spec.image);
    match last_build {
        Some(build) => println!("  直前のビルド: #{}", build.build_number()),
        None => println!("  直前のビルド: (なし)"),
    }
    println!();

    match imageflow_build::build_reason(image, last_build, builder) {
        Some(reason) => {
            println!("{} ({})", "ビルドが必要です".yellow().bold(), reason);
            println!(
                "  次のビルド番号: {}",
                imageflow_build::next_build_number(image)
            );
        }
        None => println!("{}", "✓ ビルドは不要です".green().bold()),
    }

    Ok(())
}

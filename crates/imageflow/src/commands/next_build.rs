use crate::OutputFormat;
use std::path::Path;

pub fn handle(
    project_path: Option<&Path>,
    image_name: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let (_, project) = crate::project::load(project_path)?;

    let image = project.image(image_name)?;
    let builder = project.builder_for(image)?;
    let build = imageflow_build::create_build(image, builder);

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&build)?,
        OutputFormat::Yaml => serde_yaml::to_string(&build)?,
    };
    println!("{}", output.trim_end());

    Ok(())
}

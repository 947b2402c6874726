//! Map command - render the surroundings of a coordinate.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tracing::info;

use groundwork::config::ConfigFile;
use groundwork::features::{TagFilter, TagSelector};
use groundwork::map::{plot_city_map, MapRequest, DEFAULT_BOX_SIZE_KM};
use groundwork::provider::{NominatimClient, OverpassClient, ReqwestClient};
use groundwork::render::{save_png, MapStyle, RenderConfig};

use crate::error::CliError;

/// Arguments for the map command.
#[derive(Debug, Args)]
pub struct MapArgs {
    /// Place name, resolved to a boundary polygon and used for the output
    /// file name
    pub place: String,

    /// Latitude of the centre point in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the centre point in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Edge length of the bounding box in kilometres
    #[arg(long, default_value_t = DEFAULT_BOX_SIZE_KM)]
    pub box_size_km: f64,

    /// Point-of-interest category to include, as KEY or KEY=VALUE.
    /// Repeatable; the default is the standard eight-category set
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Where to write the PNG; defaults to the configured output
    /// directory and a name derived from the place
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Run the map command.
pub fn run(args: MapArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    let client = ReqwestClient::with_timeout(Duration::from_secs(config.overpass.timeout_secs))
        .map_err(CliError::Http)?;
    let overpass = OverpassClient::new(client.clone()).with_base_url(&config.overpass.url);
    let nominatim = NominatimClient::new(client).with_base_url(&config.nominatim.url);

    let mut request =
        MapRequest::new(&args.place, args.lat, args.lon).with_box_size_km(args.box_size_km);
    if !args.tags.is_empty() {
        request = request.with_tags(parse_tags(&args.tags)?);
    }

    let render_config = RenderConfig {
        width: config.render.width,
        height: config.render.height,
    };

    match plot_city_map(
        &overpass,
        &nominatim,
        &request,
        &render_config,
        &MapStyle::default(),
    ) {
        Some(figure) => {
            let path = args
                .output
                .unwrap_or_else(|| config.render.output_dir.join(output_name(&args.place)));
            save_png(&figure, &path)?;
            info!(path = %path.display(), "figure written");
            println!("Map for {} written to {}", args.place, path.display());
            Ok(())
        }
        None => {
            // The pipeline already logged the diagnostic; mirror it on
            // stdout and treat the empty result as a normal outcome.
            println!(
                "Could not plot map for {} at ({}, {}) with box size {} km.",
                args.place, args.lat, args.lon, args.box_size_km
            );
            Ok(())
        }
    }
}

/// Parses `KEY` and `KEY=VALUE` arguments into a tag filter.
fn parse_tags(tags: &[String]) -> Result<TagFilter, CliError> {
    let mut filter = TagFilter::empty();
    for tag in tags {
        let (key, selector) = match tag.split_once('=') {
            Some((key, value)) => (key, TagSelector::Value(value.to_string())),
            None => (tag.as_str(), TagSelector::Any),
        };
        if key.is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "tag '{}' has no key; expected KEY or KEY=VALUE",
                tag
            )));
        }
        filter = filter.with_tag(key, selector);
    }
    Ok(filter)
}

/// Derives a file name from the place name.
fn output_name(place: &str) -> String {
    let mut name = String::new();
    for c in place.chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
        } else if !name.ends_with('-') && !name.is_empty() {
            name.push('-');
        }
    }
    let name = name.trim_end_matches('-');
    if name.is_empty() {
        "map.png".to_string()
    } else {
        format!("{}.png", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags_key_only_and_key_value() {
        let filter = parse_tags(&["amenity".to_string(), "religion=buddhist".to_string()])
            .unwrap();
        assert_eq!(filter.len(), 2);

        let selectors: Vec<(&str, &TagSelector)> = filter.iter().collect();
        assert_eq!(selectors[0].0, "amenity");
        assert_eq!(*selectors[0].1, TagSelector::Any);
        assert_eq!(
            *selectors[1].1,
            TagSelector::Value("buddhist".to_string())
        );
    }

    #[test]
    fn test_parse_tags_rejects_missing_key() {
        let result = parse_tags(&["=museum".to_string()]);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_output_name_is_sanitised() {
        assert_eq!(output_name("Cambridge"), "cambridge.png");
        assert_eq!(
            output_name("Kampala, Uganda"),
            "kampala-uganda.png"
        );
        assert_eq!(output_name("***"), "map.png");
    }
}

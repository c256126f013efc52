use super::transfer_config::TransferConfig;
use super::transfer_error::TransferError;
use super::transfer_link::TransferLink;
use super::transfer_type::TransferType;
use serde::Serialize;
use std::path::Path;

/// one (link, attribute) pair of the long-form intermediate file
#[derive(Debug, Serialize)]
struct ExtensionRow {
    from_stop_id_num: usize,
    to_stop_id_num: usize,
    attr_name: String,
    attr_value: String,
}

/// writes the transfer attributes in long form for the routing extension.
///
/// infeasible links never reach the engine, and links that could not be
/// re-keyed onto numeric stop ids are excluded with them. the long
/// key/value shape lets the extension parse one fixed schema no matter
/// which attribute columns the supplemental file carried.
pub fn write_extension_file(
    links: &[TransferLink],
    output_directory: &Path,
    config: &TransferConfig,
) -> Result<(), TransferError> {
    let path = output_directory.join(&config.output_filename);
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(&path)
        .map_err(|e| TransferError::WriteError {
            filename: config.output_filename.clone(),
            error: format!("{e}"),
        })?;

    // written explicitly so the header survives even a zero-row export
    writer
        .write_record(["from_stop_id_num", "to_stop_id_num", "attr_name", "attr_value"])
        .map_err(|e| TransferError::WriteError {
            filename: config.output_filename.clone(),
            error: format!("{e}"),
        })?;

    for link in links {
        let (from_stop_id_num, to_stop_id_num) = match (link.from_stop_num, link.to_stop_num) {
            (Some(from_num), Some(to_num)) => (from_num, to_num),
            _ => continue,
        };
        if link.transfer_type == TransferType::Infeasible {
            continue;
        }
        for (attr_name, attr_value) in link_attributes(link) {
            writer
                .serialize(ExtensionRow {
                    from_stop_id_num,
                    to_stop_id_num,
                    attr_name,
                    attr_value,
                })
                .map_err(|e| TransferError::WriteError {
                    filename: config.output_filename.clone(),
                    error: format!("{e}"),
                })?;
        }
    }
    writer.flush().map_err(|e| TransferError::WriteError {
        filename: config.output_filename.clone(),
        error: format!("{e}"),
    })?;

    log::debug!("wrote {}", path.display());
    Ok(())
}

/// the attributes exported for one link, in a fixed order so repeated
/// exports of the same relation are byte-identical. string stop ids, the
/// duration-typed walk time, the seconds-denominated minimum, the route
/// restrictions, and schedule_precedence are all dropped here; numeric ids
/// and minute-denominated values are sufficient downstream.
fn link_attributes(link: &TransferLink) -> Vec<(String, String)> {
    let mut attributes = vec![(
        String::from("transfer_type"),
        link.transfer_type.code().to_string(),
    )];
    if let Some(dist) = link.distance_miles {
        attributes.push((String::from("dist"), format_float(dist)));
    }
    for (name, value) in link.extras.iter() {
        attributes.push((name.clone(), value.clone()));
    }
    attributes.push((String::from("transfer_penalty"), format_float(link.penalty)));
    attributes.push((
        String::from("min_transfer_time_min"),
        format_float(link.min_transfer_time_min),
    ));
    if let Some(walk_time_min) = link.walk_time_min {
        attributes.push((String::from("walk_time_min"), format_float(walk_time_min)));
    }
    attributes
}

/// floats keep their decimal point in the output, so ten minutes prints as
/// `10.0` rather than `10`
fn format_float(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::write_extension_file;
    use crate::transfers::{TransferConfig, TransferLink, TransferType};
    use std::collections::BTreeMap;

    fn link(
        from: &str,
        to: &str,
        from_num: Option<usize>,
        to_num: Option<usize>,
        transfer_type: TransferType,
    ) -> TransferLink {
        TransferLink {
            from_stop: from.to_string(),
            to_stop: to.to_string(),
            from_stop_num: from_num,
            to_stop_num: to_num,
            transfer_type,
            min_transfer_time_sec: 0.0,
            min_transfer_time_min: 0.0,
            distance_miles: Some(0.5),
            walk_time_min: Some(10.0),
            walk_time: Some(chrono::Duration::minutes(10)),
            from_route: None,
            to_route: None,
            schedule_precedence: None,
            extras: BTreeMap::new(),
            penalty: TransferLink::PENALTY,
        }
    }

    fn read(dir: &std::path::Path) -> String {
        std::fs::read_to_string(dir.join(TransferConfig::DEFAULT_OUTPUT_FILENAME))
            .expect("export file should exist")
    }

    #[test]
    fn test_exports_the_full_attribute_set_in_fixed_order() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let links = vec![link("A", "B", Some(1), Some(2), TransferType::Recommended)];
        write_extension_file(&links, dir.path(), &TransferConfig::default())
            .expect("export should succeed");

        let expected = "\
from_stop_id_num to_stop_id_num attr_name attr_value
1 2 transfer_type 0
1 2 dist 0.5
1 2 transfer_penalty 1.0
1 2 min_transfer_time_min 0.0
1 2 walk_time_min 10.0
";
        assert_eq!(read(dir.path()), expected);
    }

    #[test]
    fn test_extras_become_attribute_rows() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let mut exported = link("A", "B", Some(1), Some(2), TransferType::Recommended);
        exported
            .extras
            .insert("elevation_gain".to_string(), "40".to_string());
        write_extension_file(&[exported], dir.path(), &TransferConfig::default())
            .expect("export should succeed");
        assert!(read(dir.path()).contains("1 2 elevation_gain 40"));
    }

    #[test]
    fn test_infeasible_links_are_excluded() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let links = vec![
            link("A", "B", Some(1), Some(2), TransferType::Infeasible),
            link("B", "C", Some(2), Some(3), TransferType::Recommended),
        ];
        write_extension_file(&links, dir.path(), &TransferConfig::default())
            .expect("export should succeed");

        let contents = read(dir.path());
        assert!(!contents.contains("1 2 "));
        assert!(contents.contains("2 3 walk_time_min 10.0"));
    }

    #[test]
    fn test_links_without_numeric_ids_are_excluded() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let links = vec![
            link("A", "Z", Some(1), None, TransferType::Recommended),
            link("Z", "B", None, Some(2), TransferType::Recommended),
        ];
        write_extension_file(&links, dir.path(), &TransferConfig::default())
            .expect("export should succeed");

        let contents = read(dir.path());
        assert_eq!(contents.lines().count(), 1, "only the header should remain");
    }

    #[test]
    fn test_export_is_idempotent() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let links = vec![
            link("A", "B", Some(1), Some(2), TransferType::Recommended),
            link("B", "C", Some(2), Some(3), TransferType::MinimumTime),
        ];
        let config = TransferConfig::default();

        write_extension_file(&links, dir.path(), &config).expect("first export should succeed");
        let first = read(dir.path());
        write_extension_file(&links, dir.path(), &config).expect("second export should succeed");
        let second = read(dir.path());
        assert_eq!(first, second);
    }

    #[test]
    fn test_does_not_mutate_the_relation() {
        let dir = tempfile::tempdir().expect("could not create temp dir");
        let links = vec![link("A", "B", Some(1), Some(2), TransferType::Infeasible)];
        write_extension_file(&links, dir.path(), &TransferConfig::default())
            .expect("export should succeed");
        // the infeasible row is filtered from the file, not from memory
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].transfer_type, TransferType::Infeasible);
    }
}

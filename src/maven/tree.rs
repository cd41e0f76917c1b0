use std::collections::BTreeSet;

use crate::model::Coordinate;

/// Extract the resolved coordinates from `mvn dependency:tree -DoutputType=text` output.
///
/// Lines with fewer than five `:`-separated fields and Maven's `---` banners are ignored.
pub fn parse_dependency_tree(output: &str) -> BTreeSet<Coordinate> {
    let mut deps = BTreeSet::new();
    for line in output.lines() {
        if line.contains("---") {
            continue;
        }
        if let Some(coordinate) = parse_tree_line(line) {
            deps.insert(coordinate);
        }
    }
    deps
}

fn parse_tree_line(line: &str) -> Option<Coordinate> {
    let parts: Vec<&str> = line.trim().split(':').collect();
    if parts.len() < 5 {
        return None;
    }

    // `[INFO] |  +- org.example` -> `org.example`
    let group = parts[0].split_whitespace().last()?;
    let artifact = parts[1].trim();
    // g:a:type:version:scope or g:a:type:classifier:version:scope
    let version = parts[parts.len() - 2].trim();
    if artifact.is_empty() || version.is_empty() {
        return None;
    }
    Some(Coordinate::new(group, artifact, version))
}

/// First coordinate (in sorted order) whose `group:artifact:version` contains `filter`.
pub fn find_dependency<'a>(deps: &'a BTreeSet<Coordinate>, filter: &str) -> Option<&'a Coordinate> {
    deps.iter().find(|coordinate| coordinate.matches(filter))
}

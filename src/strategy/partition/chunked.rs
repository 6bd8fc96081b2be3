use tracing::{debug, info};

use crate::{
    SplitError,
    config::SplitConfig,
    discovery::{FileDiscovery, FileFilter, WalkDiscovery},
    group::{GroupCollection, Partition},
    partition::{Partitioner, file_identifier},
};

/// A [`Partitioner`] cutting sorted test files into contiguous chunks.
///
/// Every location becomes its own partition. Its files are sorted by their
/// full path string, byte by byte, and filled group by group, at most
/// [`max_per_group`] files each, into at most `groups` groups. Neighbouring
/// files therefore stay in the same group, which keeps shared fixtures of a
/// directory on one worker.
///
/// Locations with at least two path segments are labelled with their last
/// segment (see [`suite_label`]), so `tests/unit` writes `<pattern>unit_1`
/// and does not collide with `tests/api`.
#[derive(Debug, Default, Clone)]
pub struct ChunkedFilePartitioner<Discovery = WalkDiscovery> {
    discovery: Discovery,
}

impl ChunkedFilePartitioner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Discovery> ChunkedFilePartitioner<Discovery> {
    pub fn with_discovery<WithDiscovery: FileDiscovery>(
        self,
        discovery: WithDiscovery,
    ) -> ChunkedFilePartitioner<WithDiscovery> {
        ChunkedFilePartitioner { discovery }
    }
}

impl<Discovery: FileDiscovery> Partitioner for ChunkedFilePartitioner<Discovery> {
    fn name(&self) -> &str {
        "chunked"
    }

    fn partition(&self, config: &SplitConfig) -> Result<Vec<Partition>, SplitError> {
        config.validate()?;
        let filter = FileFilter::new(config)?;

        let mut partitions = Vec::with_capacity(config.locations().len());
        for location in config.locations() {
            let suite = suite_label(location);
            let mut files = self
                .discovery
                .discover(config.project_root(), location, &filter)?;
            // Whole path strings, not components: `user-admin/` before `user/`.
            files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

            let max = max_per_group(files.len(), config.groups());
            info!("Processing {} files", files.len());
            debug!(location = %location, max_per_group = max, "chunking test files");

            let mut groups = GroupCollection::new();
            let mut index = 1;
            let mut in_group = 0;
            for file in &files {
                // The last allowed group takes whatever is left.
                if in_group == max && groups.len() < config.groups() {
                    index += 1;
                    in_group = 0;
                }
                groups.add(index, file_identifier(file));
                in_group += 1;
            }

            partitions.push(Partition::new(groups).with_suite(suite.map(str::to_string)));
        }

        Ok(partitions)
    }
}

/// Upper bound of files per group when chunking `total` files into `groups`.
///
/// This is `total / groups` (or 1 if there are not more files than groups),
/// plus one if the division leaves a remainder.
pub fn max_per_group(total: usize, groups: usize) -> usize {
    let mut max = match total > groups {
        true => total / groups,
        false => 1,
    };
    if total % groups > 0 {
        max += 1;
    }
    max
}

/// The suite label of a location: its last segment, if it has at least two
/// non-empty `/` separated segments.
pub fn suite_label(location: &str) -> Option<&str> {
    let mut segments = location.split('/').filter(|segment| !segment.is_empty());
    let first = segments.next();
    match (first, segments.last()) {
        (Some(_), Some(last)) => Some(last),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::PathBuf};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::items;

    fn files(location: &str, names: &[&str]) -> BTreeMap<String, Vec<PathBuf>> {
        BTreeMap::from([(
            location.to_string(),
            names.iter().map(|name| PathBuf::from(format!("{location}/{name}"))).collect(),
        )])
    }

    #[test]
    fn seven_files_into_three_groups() {
        let partitioner = ChunkedFilePartitioner::new().with_discovery(files(
            "tests",
            &["f7", "f3", "f1", "f5", "f2", "f6", "f4"],
        ));
        let config = SplitConfig::new(3).with_tests_from("tests");
        let partitions = partitioner.partition(&config).unwrap();

        assert_eq!(partitions.len(), 1);
        let groups = &partitions[0].groups;
        assert_eq!(groups.len(), 3);
        assert_eq!(items(groups, 1), ["tests/f1", "tests/f2", "tests/f3"]);
        assert_eq!(items(groups, 2), ["tests/f4", "tests/f5", "tests/f6"]);
        assert_eq!(items(groups, 3), ["tests/f7"]);
    }

    #[test]
    fn fewer_files_than_groups_share_the_first_group() {
        // max_per_group(2, 3) is 2, so both files fit the first group.
        let partitioner =
            ChunkedFilePartitioner::new().with_discovery(files("tests", &["b", "a"]));
        let config = SplitConfig::new(3).with_tests_from("tests");
        let partitions = partitioner.partition(&config).unwrap();

        let groups = &partitions[0].groups;
        assert_eq!(groups.len(), 1);
        assert_eq!(items(groups, 1), ["tests/a", "tests/b"]);
    }

    #[test]
    fn never_more_groups_than_requested() {
        for total in 0..40 {
            let names: Vec<String> = (0..total).map(|i| format!("{i:03}Test.php")).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let partitioner =
                ChunkedFilePartitioner::new().with_discovery(files("tests", &names));

            for requested in 1..=6 {
                let config = SplitConfig::new(requested).with_tests_from("tests");
                let partitions = partitioner.partition(&config).unwrap();
                let groups = &partitions[0].groups;
                let max = max_per_group(total, requested);

                assert!(groups.len() <= requested, "{total} files, {requested} groups");
                assert_eq!(groups.item_count(), total);
                let sizes: Vec<usize> = groups.iter().map(|g| g.items.len()).collect();
                if let Some((_, init)) = sizes.split_last() {
                    assert!(init.iter().all(|&size| size <= max), "{sizes:?}");
                }
            }
        }
    }

    #[test]
    fn files_sort_by_full_path_string() {
        let partitioner = ChunkedFilePartitioner::new().with_discovery(files(
            "tests",
            &["user/ATest.php", "user-admin/BTest.php", "user.old/CTest.php"],
        ));
        let config = SplitConfig::new(3).with_tests_from("tests");
        let partitions = partitioner.partition(&config).unwrap();

        let groups = &partitions[0].groups;
        assert_eq!(items(groups, 1), ["tests/user-admin/BTest.php"]);
        assert_eq!(items(groups, 2), ["tests/user.old/CTest.php"]);
        assert_eq!(items(groups, 3), ["tests/user/ATest.php"]);
    }

    #[test]
    fn each_location_gets_its_own_labelled_partition() {
        let mut discovery = files("tests/unit", &["ATest.php", "BTest.php"]);
        discovery.extend(files("tests/api", &["CCest.php"]));
        let partitioner = ChunkedFilePartitioner::new().with_discovery(discovery);
        let config = SplitConfig::new(2).with_suites("tests", "unit,api");

        let partitions = partitioner.partition(&config).unwrap();
        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[0].suite.as_deref(), Some("unit"));
        assert_eq!(items(&partitions[0].groups, 1), ["tests/unit/ATest.php"]);
        assert_eq!(items(&partitions[0].groups, 2), ["tests/unit/BTest.php"]);
        assert_eq!(partitions[1].suite.as_deref(), Some("api"));
        assert_eq!(items(&partitions[1].groups, 1), ["tests/api/CCest.php"]);
    }

    #[test]
    fn max_per_group_rounds_up() {
        assert_eq!(max_per_group(7, 3), 3);
        assert_eq!(max_per_group(9, 3), 3);
        assert_eq!(max_per_group(10, 3), 4);
        assert_eq!(max_per_group(3, 3), 1);
        assert_eq!(max_per_group(2, 3), 2);
        assert_eq!(max_per_group(0, 3), 1);
    }

    #[test]
    fn suite_label_needs_two_segments() {
        assert_eq!(suite_label("tests/unit"), Some("unit"));
        assert_eq!(suite_label("/tests//acceptance/"), Some("acceptance"));
        assert_eq!(suite_label("tests"), None);
        assert_eq!(suite_label("/tests/"), None);
        assert_eq!(suite_label(""), None);
    }
}

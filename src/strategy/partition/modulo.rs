use tracing::info;

use crate::{
    SplitError,
    config::SplitConfig,
    discovery::{FileDiscovery, FileFilter, WalkDiscovery},
    group::{GroupCollection, Partition},
    partition::{Partitioner, file_identifier, round_robin},
};

/// A [`Partitioner`] dealing test files round-robin.
///
/// Files of all locations are dealt in discovery order into one partition,
/// the `n`-th file lands in group `(n % groups) + 1`. Files are not sorted, so
/// the result follows whatever order the [`FileDiscovery`] reports.
#[derive(Debug, Default, Clone)]
pub struct ModuloFilePartitioner<Discovery = WalkDiscovery> {
    discovery: Discovery,
}

impl ModuloFilePartitioner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Discovery> ModuloFilePartitioner<Discovery> {
    pub fn with_discovery<WithDiscovery: FileDiscovery>(
        self,
        discovery: WithDiscovery,
    ) -> ModuloFilePartitioner<WithDiscovery> {
        ModuloFilePartitioner { discovery }
    }
}

impl<Discovery: FileDiscovery> Partitioner for ModuloFilePartitioner<Discovery> {
    fn name(&self) -> &str {
        "modulo"
    }

    fn partition(&self, config: &SplitConfig) -> Result<Vec<Partition>, SplitError> {
        config.validate()?;
        let filter = FileFilter::new(config)?;

        let mut files = Vec::new();
        for location in config.locations() {
            files.extend(
                self.discovery
                    .discover(config.project_root(), location, &filter)?,
            );
        }

        info!("Processing {} files", files.len());

        let mut groups = GroupCollection::new();
        for (counter, file) in files.iter().enumerate() {
            groups.add(round_robin(counter, config.groups()), file_identifier(file));
        }

        Ok(vec![Partition::new(groups)])
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::PathBuf};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::items;

    fn discovery(location: &str, files: &[&str]) -> BTreeMap<String, Vec<PathBuf>> {
        BTreeMap::from([(
            location.to_string(),
            files.iter().map(PathBuf::from).collect(),
        )])
    }

    #[test]
    fn files_are_dealt_in_discovery_order() {
        let partitioner = ModuloFilePartitioner::new().with_discovery(discovery(
            "tests",
            &["tests/e.feature", "tests/a.feature", "tests/c.feature", "tests/b.feature"],
        ));
        let partitions = partitioner.partition(&SplitConfig::new(3)).unwrap();

        assert_eq!(partitions.len(), 1);
        let groups = &partitions[0].groups;
        assert_eq!(items(groups, 1), ["tests/e.feature", "tests/b.feature"]);
        assert_eq!(items(groups, 2), ["tests/a.feature"]);
        assert_eq!(items(groups, 3), ["tests/c.feature"]);
        assert_eq!(partitions[0].suite, None);
    }

    #[test]
    fn counter_continues_across_locations() {
        let mut files = discovery(
            "tests/unit",
            &["tests/unit/ATest.php", "tests/unit/BTest.php", "tests/unit/CTest.php"],
        );
        files.extend(discovery("tests/api", &["tests/api/DCest.php"]));
        let partitioner = ModuloFilePartitioner::new().with_discovery(files);
        let config = SplitConfig::new(2).with_suites("tests", "unit,api");
        let partitions = partitioner.partition(&config).unwrap();

        let groups = &partitions[0].groups;
        assert_eq!(items(groups, 1), ["tests/unit/ATest.php", "tests/unit/CTest.php"]);
        assert_eq!(items(groups, 2), ["tests/unit/BTest.php", "tests/api/DCest.php"]);
    }

    #[test]
    fn fewer_files_than_groups_only_populates_some_groups() {
        let partitioner = ModuloFilePartitioner::new()
            .with_discovery(discovery("tests", &["tests/OneTest.php"]));
        let partitions = partitioner.partition(&SplitConfig::new(4)).unwrap();
        assert_eq!(partitions[0].groups.len(), 1);
    }

    #[test]
    fn group_sizes_differ_by_at_most_one() {
        let files: Vec<String> = (0..23).map(|i| format!("tests/{i:02}Test.php")).collect();
        let files: Vec<&str> = files.iter().map(String::as_str).collect();
        let partitioner =
            ModuloFilePartitioner::new().with_discovery(discovery("tests", &files));

        for groups in 1..=7 {
            let partitions = partitioner.partition(&SplitConfig::new(groups)).unwrap();
            let sizes: Vec<usize> = partitions[0].groups.iter().map(|g| g.items.len()).collect();
            let min = sizes.iter().min().copied().unwrap_or_default();
            let max = sizes.iter().max().copied().unwrap_or_default();
            assert!(max - min <= 1, "{groups} groups: {sizes:?}");
            assert_eq!(partitions[0].groups.item_count(), 23);
        }
    }
}

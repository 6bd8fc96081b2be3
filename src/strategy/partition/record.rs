use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
};

use tracing::{debug, info, warn};

use crate::{
    SplitError,
    annotation::{AnnotationReader, NoAnnotations},
    config::SplitConfig,
    group::{GroupCollection, Partition},
    loader::{NoLoader, TestLoader},
    partition::{Partitioner, round_robin},
    test::TestRecord,
};

/// A [`Partitioner`] over loaded test records that keeps dependent tests
/// together.
///
/// Every test that depends on another test, and every test something depends
/// on, goes into one reserved dependency group. All other tests are dealt
/// round-robin over the remaining `groups - 1` groups, in load order.
///
/// The dependency group gets the index the round-robin would have used next.
/// When that index is already populated, the dependency group **replaces** its
/// content and the tests previously assigned there are not part of any group
/// file. This is kept on purpose so existing group layouts stay stable; the
/// replacement is logged as a warning.
#[derive(Debug, Default, Clone)]
pub struct RecordPartitioner<Loader = NoLoader, Annotations = NoAnnotations> {
    loader: Loader,
    annotations: Annotations,
}

impl RecordPartitioner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Loader, Annotations> RecordPartitioner<Loader, Annotations> {
    pub fn with_loader<WithLoader: TestLoader>(
        self,
        loader: WithLoader,
    ) -> RecordPartitioner<WithLoader, Annotations> {
        RecordPartitioner {
            loader,
            annotations: self.annotations,
        }
    }

    pub fn with_annotations<WithAnnotations: AnnotationReader>(
        self,
        annotations: WithAnnotations,
    ) -> RecordPartitioner<Loader, WithAnnotations> {
        RecordPartitioner {
            loader: self.loader,
            annotations,
        }
    }
}

impl<Loader: TestLoader, Annotations: AnnotationReader> RecordPartitioner<Loader, Annotations> {
    /// Load the records of every configured location, in configuration order.
    pub fn load(&self, config: &SplitConfig) -> Result<Vec<TestRecord>, SplitError> {
        let mut records = Vec::new();
        for location in config.locations() {
            let path = config.project_root().join(location);
            for loaded in self.loader.load(&path)? {
                match loaded.into_record() {
                    Some(record) => records.push(record),
                    None => warn!(location = %location, "skipping data provider without any tests"),
                }
            }
        }
        Ok(records)
    }

    /// Collect the names of all tests that depend on others or are depended
    /// upon, in first-seen order.
    pub fn dependent_set<'r>(
        &self,
        records: &'r [TestRecord],
    ) -> Result<DependentSet<'r>, SplitError> {
        let mut by_signature: HashMap<&str, &str> = HashMap::with_capacity(records.len());
        for record in records {
            by_signature
                .entry(record.signature.as_ref())
                .or_insert(record.name.as_ref());
        }

        let mut dependent = DependentSet::default();
        for record in records {
            let mut depends: Vec<Cow<'_, str>> =
                record.depends.iter().map(|d| Cow::Borrowed(d.as_ref())).collect();
            if let Some(origin) = &record.origin {
                depends.extend(self.annotations.depends(origin)?.into_iter().map(Cow::Owned));
            }
            if depends.is_empty() {
                continue;
            }

            dependent.insert(record.name.as_ref());
            for dependency in &depends {
                let signature = match &record.origin {
                    Some(origin) => origin.qualify(dependency),
                    None => Cow::Borrowed(dependency.as_ref()),
                };
                let Some(&name) = by_signature.get(signature.as_ref()) else {
                    return Err(SplitError::UnresolvedDependency {
                        test: record.name.to_string(),
                        dependency: signature.into_owned(),
                    });
                };
                dependent.insert(name);
            }
        }

        Ok(dependent)
    }
}

impl<Loader: TestLoader, Annotations: AnnotationReader> Partitioner
    for RecordPartitioner<Loader, Annotations>
{
    fn name(&self) -> &str {
        "records"
    }

    fn partition(&self, config: &SplitConfig) -> Result<Vec<Partition>, SplitError> {
        config.validate()?;
        let records = self.load(config)?;
        let dependent = self.dependent_set(&records)?;

        let mut groups = config.groups();
        if !dependent.is_empty() {
            groups -= 1;
            if groups == 0 {
                return Err(SplitError::config(format!(
                    "{} dependent tests need a reserved group, but only {} group was requested",
                    dependent.len(),
                    config.groups()
                )));
            }
        }

        info!("Processing {} tests", records.len());

        let mut collection = GroupCollection::new();
        let mut counter = 0;
        for record in &records {
            if dependent.contains(&record.name) {
                continue;
            }
            collection.add(round_robin(counter, groups), record.name.as_ref());
            counter += 1;
        }

        if !dependent.is_empty() {
            let index = round_robin(counter, groups);
            debug!(group = index, tests = dependent.len(), "assigning dependency group");
            if let Some(replaced) = collection.replace(index, dependent.to_vec()) {
                warn!(
                    group = index,
                    replaced = replaced.len(),
                    "dependency group replaces the tests already assigned to group {index}"
                );
            }
        }

        Ok(vec![Partition::new(collection)])
    }
}

/// Deduplicated, insertion ordered set of test names.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependentSet<'r> {
    order: Vec<&'r str>,
    seen: HashSet<&'r str>,
}

impl<'r> DependentSet<'r> {
    /// Insert `name` unless present. Returns whether it was inserted.
    pub fn insert(&mut self, name: &'r str) -> bool {
        let inserted = self.seen.insert(name);
        if inserted {
            self.order.push(name);
        }
        inserted
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'r str> + '_ {
        self.order.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

use std::{borrow::Cow, path::Path};

use crate::{
    SplitError,
    group::GroupCollection,
    test::{LoadedTest, TestRecord},
};

/// Build a record declared in unit `Suite`, with signature `Suite:<name>`.
///
/// `record!("B" depends ["A"])` additionally declares dependencies, bare
/// names resolve to other records built by this macro.
macro_rules! record {
    ($name:literal) => {
        $crate::test::TestRecord::new($name, concat!("Suite:", $name))
            .with_origin($crate::test::TestOrigin::new("Suite", $name))
    };

    ($name:literal depends [$($dep:literal),+ $(,)?]) => {
        $crate::test::TestRecord::new($name, concat!("Suite:", $name))
            .with_origin($crate::test::TestOrigin::new("Suite", $name))
            .with_depends([$($dep),+])
    };
}

pub(crate) use record;

/// A record without origin, so it never carries dependencies.
pub fn plain(name: impl Into<Cow<'static, str>>) -> TestRecord {
    let name = name.into();
    TestRecord::new(name.clone(), name)
}

/// A loader returning `records` for every location.
pub fn loader(
    records: Vec<TestRecord>,
) -> impl Fn(&Path) -> Result<Vec<LoadedTest>, SplitError> {
    move |_: &Path| Ok(records.iter().cloned().map(LoadedTest::from).collect())
}

/// The identifiers of group `index`, empty if the group does not exist.
pub fn items(groups: &GroupCollection, index: usize) -> Vec<&str> {
    groups
        .get(index)
        .map(|items| items.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

use std::time::Instant;

use tracing::{debug, info};

use crate::{
    SplitError, SplitReport,
    config::SplitConfig,
    group::Partition,
    partition::Partitioner,
    writer::{GroupWriter, write_partition},
};

pub struct Splitter<Partitioner, Writer> {
    pub(crate) config: SplitConfig,
    pub(crate) partitioner: Partitioner,
    pub(crate) writer: Writer,
}

impl<P: Partitioner, Writer> Splitter<P, Writer> {
    /// Compute all partitions without writing anything.
    pub fn plan(&self) -> Result<Vec<Partition>, SplitError> {
        self.config.validate()?;
        let partitions = self.partitioner.partition(&self.config)?;
        debug!(
            partitioner = self.partitioner.name(),
            partitions = partitions.len(),
            "planned split"
        );
        Ok(partitions)
    }
}

impl<P: Partitioner, Writer: GroupWriter> Splitter<P, Writer> {
    /// Compute all partitions and write their group files.
    ///
    /// Nothing is written unless every partition could be computed.
    pub fn run(mut self) -> Result<SplitReport, SplitError> {
        let now = Instant::now();
        let partitions = self.plan()?;

        let mut written = Vec::new();
        for partition in &partitions {
            written.extend(write_partition(&mut self.writer, &self.config, partition)?);
        }

        let report = SplitReport {
            written,
            duration: now.elapsed(),
        };
        info!(
            files = report.written.len(),
            identifiers = report.identifier_count(),
            "split finished in {:?}",
            report.duration
        );
        Ok(report)
    }
}

impl<Partitioner, Writer> Splitter<Partitioner, Writer> {
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn with_partitioner<WithPartitioner: crate::partition::Partitioner>(
        self,
        partitioner: WithPartitioner,
    ) -> Splitter<WithPartitioner, Writer> {
        Splitter {
            config: self.config,
            partitioner,
            writer: self.writer,
        }
    }

    pub fn with_writer<WithWriter: GroupWriter>(
        self,
        writer: WithWriter,
    ) -> Splitter<Partitioner, WithWriter> {
        Splitter {
            config: self.config,
            partitioner: self.partitioner,
            writer,
        }
    }
}

use roster_model::{OutputOptions, PipelineOptions, ValidationPolicy};
use roster_standards::Lookups;

/// Borrowed configuration for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct ProcessingContext<'a> {
    pub options: &'a PipelineOptions,
    pub lookups: &'a Lookups,
}

impl<'a> ProcessingContext<'a> {
    pub fn new(options: &'a PipelineOptions, lookups: &'a Lookups) -> Self {
        Self { options, lookups }
    }

    pub fn policy(&self) -> &'a ValidationPolicy {
        &self.options.policy
    }

    pub fn output(&self) -> &'a OutputOptions {
        &self.options.output
    }
}

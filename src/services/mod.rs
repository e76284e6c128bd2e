pub(crate) mod analytics;
pub(crate) mod catalog;
pub(crate) mod evaluation;
pub(crate) mod evaluator;
pub(crate) mod recommendations;
pub(crate) mod scoring;

mod fixtures;
mod pipeline_tests;

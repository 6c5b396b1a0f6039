mod arguments;
mod brackets;
mod defaults;
mod math;
mod samples;

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]
#![allow(clippy::panic)]

mod pipeline;
mod scanner;
mod workflow;

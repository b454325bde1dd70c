pub mod quantum;

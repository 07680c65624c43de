pub mod stage1_sweep;
pub mod stage2_report;

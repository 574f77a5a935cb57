pub mod barchart;
pub mod kpi;
pub mod video_table;

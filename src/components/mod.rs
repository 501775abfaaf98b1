pub mod flow_map;

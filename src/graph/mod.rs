mod graph;

pub use graph::CountyGraph;

pub mod video_graph;

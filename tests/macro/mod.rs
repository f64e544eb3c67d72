pub mod hash_map;

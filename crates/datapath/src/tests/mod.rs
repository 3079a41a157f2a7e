mod property_paths;

use bead_core::{BeadColor, Grid, Palette};
use bead_project::{
    load_project_file, save_project_file, Catalog, CatalogError, JsonFileCatalog, ProjectFile,
    StoredProject,
};

fn sample_grid() -> Grid {
    let palette = Palette::classic();
    let mut grid = Grid::new();
    for i in 0..24 {
        grid.set(i, i, palette.get(i)).unwrap();
    }
    grid.set(0, 23, Some(BeadColor::rgb(1, 2, 3))).unwrap();
    grid
}

#[test]
fn project_file_roundtrip() {
    let grid = sample_grid();
    let file = ProjectFile::from_grid(&grid);

    let path = std::path::Path::new("target/test_project.beads.json");
    save_project_file(path, &file).unwrap();
    let loaded = load_project_file(path).unwrap();

    assert_eq!(loaded, file);

    let mut restored = Grid::new();
    restored.replace(&loaded.grid).unwrap();
    assert_eq!(restored, grid);
}

#[test]
fn load_missing_file_fails() {
    assert!(load_project_file("target/does_not_exist.beads.json").is_err());
}

#[test]
fn json_catalog_persists_between_instances() {
    let path = std::path::Path::new("target/test_catalog/beads_projects.json");
    let _ = std::fs::remove_file(path);

    let mut catalog = JsonFileCatalog::new(path);
    assert!(catalog.list().unwrap().is_empty());
    catalog
        .save("diagonal", StoredProject::from_grid(&sample_grid()))
        .unwrap();
    catalog
        .save("blank", StoredProject::from_grid(&Grid::new()))
        .unwrap();

    let reopened = JsonFileCatalog::new(path);
    assert_eq!(reopened.list().unwrap(), vec!["blank", "diagonal"]);
    let stored = reopened.load("diagonal").unwrap().unwrap();
    assert_eq!(stored.grid, sample_grid().snapshot());

    let mut reopened = reopened;
    assert!(reopened.delete("blank").unwrap());
    assert_eq!(
        JsonFileCatalog::new(path).list().unwrap(),
        vec!["diagonal"]
    );
}

#[test]
fn json_catalog_survives_one_corrupt_entry() {
    let path = std::path::Path::new("target/test_catalog_corrupt/beads_projects.json");
    let _ = std::fs::remove_file(path);

    let mut catalog = JsonFileCatalog::new(path);
    catalog
        .save("good", StoredProject::from_grid(&sample_grid()))
        .unwrap();
    catalog
        .save("broken", StoredProject::from_grid(&Grid::new()))
        .unwrap();

    // an unknown color name in a single cell of one entry
    let mut raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    raw["broken"]["grid"][0][0] = serde_json::Value::from("chartreuse");
    std::fs::write(path, raw.to_string()).unwrap();

    assert_eq!(catalog.list().unwrap(), vec!["broken", "good"]);
    assert_eq!(
        catalog.load("good").unwrap().unwrap().grid,
        sample_grid().snapshot()
    );
    let err = catalog.load("broken").unwrap_err();
    assert!(matches!(err, CatalogError::BadEntry { ref name, .. } if name == "broken"));

    catalog
        .save("fresh", StoredProject::from_grid(&Grid::new()))
        .unwrap();
    assert_eq!(catalog.list().unwrap(), vec!["broken", "fresh", "good"]);
    // saving elsewhere must not rewrite the bad entry away
    assert!(catalog.load("broken").is_err());

    assert!(catalog.delete("broken").unwrap());
    assert_eq!(catalog.list().unwrap(), vec!["fresh", "good"]);
    assert!(catalog.load("good").unwrap().is_some());
}

//! One coupling step on disk: export the grid, read back heat/cool rates,
//! write prefactors.

use std::fs;

use ascii_table::AsciiTable;
use coupling::{
    CouplingConfig, GridExporter, PrefactorUpdate, Process, RateRescaler, RunParameters,
};
use hydro_common::{InMemorySource, UnitSet};
use test_utils::{
    assert_approx_eq, synthetic_coefficient, synthetic_ne, synthetic_nh, synthetic_prefactor,
    synthetic_rho, synthetic_snapshot, write_definitions, write_heatcool_table, HeatCoolFixtureRow,
};

const NX1: usize = 5;
const NX2: usize = 4;

fn source() -> InMemorySource {
    let mut source = InMemorySource::new();
    source.insert(synthetic_snapshot(NX1, NX2));
    source
}

/// Rows whose rates are `factor` times the current prefactor estimate.
fn heatcool_rows(units: &UnitSet, factor: f64) -> Vec<HeatCoolFixtureRow> {
    let mut rows = Vec::new();
    for j in 0..NX2 {
        for i in 0..NX1 {
            let estimate = |k: usize| {
                synthetic_prefactor(i, j)
                    * synthetic_coefficient(k, i, j)
                    * (synthetic_ne(i, j) * synthetic_nh(i, j))
                    * factor
            };
            rows.push(HeatCoolFixtureRow {
                i,
                j,
                rcen: 1.0e10 * (1.0 + i as f64),
                thetacen: 0.15 * (1.0 + j as f64),
                rho: synthetic_rho(i, j) * units.density,
                heat_comp: estimate(0),
                cool_comp: estimate(1),
                cool_lines: estimate(2),
                cool_ff: estimate(3),
                heat_xray: estimate(4),
            });
        }
    }
    rows
}

#[test]
fn test_definitions_units() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_definitions(dir.path(), 1.0, 2.0, 3.0).unwrap();
    let units = UnitSet::from_file(path).unwrap();
    assert_eq!(units, UnitSet::new(1.0, 2.0, 3.0));
}

#[test]
fn test_export_writes_cycle_table() {
    let dir = tempfile::tempdir().unwrap();
    let units = UnitSet::new(1.0e-12, 1.0e10, 1.0e8);

    let path = GridExporter::default()
        .export(&source(), 1, &units, dir.path())
        .unwrap();
    assert_eq!(path.file_name().unwrap(), "00000001.pluto");

    let table = AsciiTable::read(&path).unwrap();
    assert_eq!(table.len(), NX1 * NX2);
    assert_eq!(table.names().len(), 11);

    let r_cent = table.column("r_cent").unwrap();
    let r_edge = table.column("r_edge").unwrap();
    for k in 0..table.len() {
        assert!(r_edge[k] < r_cent[k]);
    }
}

#[test]
fn test_export_unknown_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let err = GridExporter::default()
        .export(&source(), 9, &UnitSet::identity(), dir.path())
        .unwrap_err();
    assert!(err.to_string().contains('9'));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_prefactor_step() {
    let dir = tempfile::tempdir().unwrap();
    write_definitions(dir.path(), 1.0e-12, 1.0e10, 1.0e8).unwrap();
    let units = UnitSet::new(1.0e-12, 1.0e10, 1.0e8);
    write_heatcool_table(dir.path(), &heatcool_rows(&units, 1.05)).unwrap();

    let config = CouplingConfig {
        prefactor_update: PrefactorUpdate::Scaled,
        ..CouplingConfig::default()
    };
    let summary = RateRescaler::from_config(&config)
        .run(&source(), 1, &config, dir.path())
        .unwrap();
    assert_eq!(summary.rows, NX1 * NX2);
    assert_eq!(summary.discrepancies, 0);
    assert_eq!(summary.output, dir.path().join("prefactors.dat"));

    let table = AsciiTable::read(&summary.output).unwrap();
    let ir = table.column("ir").unwrap();
    let itheta = table.column("itheta").unwrap();
    for p in Process::OUTPUT_ORDER {
        let column = table.column(p.prefactor_column()).unwrap();
        for k in 0..table.len() {
            let expected = 1.05 * synthetic_prefactor(ir[k] as usize, itheta[k] as usize);
            assert_approx_eq!(column[k], expected, 1e-6 * expected);
        }
    }
}

#[test]
fn test_prefactor_step_damps_large_changes() {
    let dir = tempfile::tempdir().unwrap();
    write_definitions(dir.path(), 1.0, 1.0, 1.0).unwrap();
    let mut rows = heatcool_rows(&UnitSet::identity(), 10.0);
    rows[3].rho *= 2.0;
    write_heatcool_table(dir.path(), &rows).unwrap();

    let config = CouplingConfig::default();
    let summary = RateRescaler::from_config(&config)
        .run(&source(), 1, &config, dir.path())
        .unwrap();
    assert_eq!(summary.discrepancies, 1);

    let table = AsciiTable::read(&summary.output).unwrap();
    let ir = table.column("ir").unwrap();
    let itheta = table.column("itheta").unwrap();
    let comp_h = table.column("comp_h_pre").unwrap();
    for k in 0..table.len() {
        let prev = synthetic_prefactor(ir[k] as usize, itheta[k] as usize);
        assert_approx_eq!(comp_h[k], prev / 0.9, 1e-6 * prev);
    }
}

#[test]
fn test_missing_heatcool_table() {
    let dir = tempfile::tempdir().unwrap();
    write_definitions(dir.path(), 1.0, 1.0, 1.0).unwrap();
    let config = CouplingConfig::default();
    let err = RateRescaler::from_config(&config)
        .run(&source(), 1, &config, dir.path())
        .unwrap_err();
    assert!(err.to_string().contains("I/O"));
    assert!(!dir.path().join("prefactors.dat").exists());
}

#[test]
fn test_parameter_files() {
    let dir = tempfile::tempdir().unwrap();
    let params_path = dir.path().join("run.yaml");
    fs::write(
        &params_path,
        "\
r_min: 1.0
r_max: 50.0
n_r: 64
t_min: 0.0
t_max: 1.5
n_t: 32
rho_0: 1.0
rho_alpha: 2.0
r_0: 1.0
cent_mass: 1.0e33
disk_mdot: 1.0e17
l_x: 1.0e37
t_x: 5.6e7
l_2_10: 2.0e36
disk_trunc_rad: 1.0e11
mu: 0.6
nphot: 1000000
",
    )
    .unwrap();
    let params = RunParameters::from_yaml_file(&params_path).unwrap();

    let ini = coupling::write_pluto_ini(dir.path(), &params, 100.0).unwrap();
    let text = fs::read_to_string(ini).unwrap();
    assert!(text.contains("X1-grid 1 1.0 64 r 50.0 1.02\n"));
    assert!(text.contains("tstop            100.0\n"));

    let pf = coupling::write_python_pf(dir.path(), "00000001", &params, 3).unwrap();
    let text = fs::read_to_string(pf).unwrap();
    assert!(text.contains("photons_per_cycle                            1000000\n"));
    assert!(text.contains("lum_agn(ergs/s) 2e+36\n"));
    assert!(text.contains("hydro_file 00000001\n"));
}

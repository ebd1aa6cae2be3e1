use hawkdove_core::{
    run_sweep, Game, Grid, GridDims, Neighborhood, SweepConfig, DOVE, HAWK, RETALIATOR,
};

fn parse(rows: &[&str], strategies: usize) -> Grid {
    let width = rows[0].len() as u32;
    let height = rows.len() as u32;
    let cells = rows
        .iter()
        .flat_map(|row| row.chars())
        .map(|c| match c {
            'H' => HAWK,
            'D' => DOVE,
            'R' => RETALIATOR,
            other => panic!("unexpected glyph {other}"),
        })
        .collect();
    Grid::from_cells(GridDims::new(width, height).unwrap(), strategies, cells).unwrap()
}

#[test]
fn hawk_dove_moore_10x10_first_generation() {
    let mut config = SweepConfig::new(GridDims::square(10).unwrap(), Game::HawkDove, vec![1.5], 1);
    config.seed = 0;
    config.parallel = false;

    let result = run_sweep(&config).unwrap();
    let run = result.get(1.5).expect("run for beta 1.5");

    let initial = parse(
        &[
            "HHDHDDHHHH",
            "DHDDHDDHHD",
            "HHHHHHDDHH",
            "HHHDDDDHHD",
            "HDHDDDHDDH",
            "DHDDDDDDDD",
            "DHHDDHHHHD",
            "HHDDHDDHHH",
            "HHDDDHHDHH",
            "DHDDHDDHDD",
        ],
        2,
    );
    let first = parse(
        &[
            "HHHHHHHHHH",
            "HHHHHHHHHH",
            "HHHHHHHHHH",
            "HHHHHHHHHH",
            "HHHHDHHHHH",
            "HHHHHHHHHH",
            "HHHHHHHHHH",
            "HHHHHHHHHH",
            "HHDHHHHHHH",
            "HHHHHHHHHH",
        ],
        2,
    );

    assert_eq!(run.history().len(), 2);
    assert_eq!(run.initial(), &initial);
    assert_eq!(run.last(), &first);
}

#[test]
fn retaliator_von_neumann_three_generations() {
    let mut config = SweepConfig::new(
        GridDims::new(8, 6).unwrap(),
        Game::HawkDoveRetaliator { epsilon: 0.0 },
        vec![2.0],
        3,
    );
    config.seed = 42;
    config.neighborhood = Neighborhood::VonNeumann;
    config.parallel = false;

    let result = run_sweep(&config).unwrap();
    let run = &result.runs()[0];

    let initial = parse(
        &[
            "HDDRRHRR", "HDRDHDRR", "HHDHDHHH", "RDHRRRRD", "DRDHHHRR", "RDDDDDHH",
        ],
        3,
    );
    let third = parse(
        &[
            "DDDDDRDR", "DDDDDRRR", "HDDDRRRD", "HHHDDRDH", "HHHDRDDD", "DHDRRRDR",
        ],
        3,
    );

    assert_eq!(run.initial(), &initial);
    assert_eq!(run.generation(3), Some(&third));
}

#[test]
fn shuffled_run_two_generations() {
    let mut config = SweepConfig::new(GridDims::square(6).unwrap(), Game::HawkDove, vec![1.5], 2);
    config.seed = 5;
    config.shuffle = true;
    config.shuffle_seed = 7;
    config.parallel = false;

    let result = run_sweep(&config).unwrap();
    let run = &result.runs()[0];

    let expected = [
        parse(&["DDHHHD", "DHDHHD", "DDHHHD", "DHDDHH", "DHHDHH", "DHHDDD"], 2),
        parse(&["HHHHHH", "DHHHHH", "HHHHHH", "HHHHHH", "HHHHHH", "HHHHHH"], 2),
        parse(&["HDHDDH", "HDDHHH", "HHHHHH", "HDHHHD", "HHDHHH", "HHHHDH"], 2),
    ];
    assert_eq!(run.history(), &expected[..]);
}

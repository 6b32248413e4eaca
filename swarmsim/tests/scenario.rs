use glam::Vec2;
use shared::util::wrap_angle;
use shared::{AntParameters, AntState, FoodParameters, NestParameters, SensorParameters};
use std::f32::consts::{FRAC_PI_4, TAU};
use swarmsim::config::{DriverConfig, FieldConfig, RateConfig, ScenarioConfig};
use swarmsim::simulation::{Environment, LIFETIME_LIMIT, LOWER_BOUND, UPPER_BOUND};
use swarmsim::{DriverAction, Simulator};

fn sensor(angle: f32) -> SensorParameters {
    SensorParameters {
        x_center_distance: 0.2,
        y_center_distance: 0.2,
        position_angle: angle,
        pixel_radius: 0,
    }
}

/// One nest in the middle and one food source up and to the right.
/// Sensors point sideways, so an ant walking a straight line never smells its own trail.
fn foraging_scenario(velocity: f32, ant_amount: u32) -> ScenarioConfig {
    ScenarioConfig {
        seed: 3,
        field: FieldConfig {
            width: 100,
            height: 100,
        },
        rates: RateConfig {
            place_pheromone_rate: 1,
            pheromone_evaporation_rate: 50,
        },
        ant_templates: vec![AntParameters {
            size: 0.01,
            velocity,
            initial_state: AntState::Explorer,
            view_frequency: 1,
            place_pheromone_intensity: 60,
            left_sensor: Some(sensor(90.0)),
            right_sensor: Some(sensor(-90.0)),
        }],
        nests: vec![NestParameters {
            id: 0,
            pos: Vec2::ZERO,
            size: 0.05,
            ant_amount,
            ant_template: 0,
        }],
        foods: vec![FoodParameters {
            id: 0,
            pos: Vec2::new(0.5, 0.5),
            size: 0.05,
            food_amount: 100,
        }],
        driver: DriverConfig::default(),
    }
}

fn populated(scenario: ScenarioConfig) -> Environment {
    let mut env = Environment::new(scenario).unwrap();
    env.create_nest(0).unwrap();
    for food in 0..env.scenario().foods.len() {
        env.create_food_source(food).unwrap();
    }
    env.create_ant(0).unwrap();
    env
}

#[test]
fn test_ant_fetches_food_and_brings_it_home() {
    let mut env = populated(foraging_scenario(0.01, 1));
    env.ants_mut()[0].set_theta(FRAC_PI_4);

    let mut transitions = vec![(0, AntState::Explorer)];
    for tick in 1..=200 {
        env.run(tick).unwrap();
        let state = env.ants()[0].state();
        if transitions.last().map(|&(_, last)| last) != Some(state) {
            transitions.push((tick, state));
        }
        if state == AntState::NestCarrier {
            break;
        }
    }

    let states: Vec<AntState> = transitions.iter().map(|&(_, state)| state).collect();
    assert_eq!(
        states,
        vec![AntState::Explorer, AntState::Carrier, AntState::NestCarrier],
        "unexpected transitions {:?}",
        transitions
    );
    let (found_food_at, _) = transitions[1];
    let (home_at, _) = transitions[2];
    assert!(
        (55..=75).contains(&found_food_at),
        "food reached at tick {}",
        found_food_at
    );
    assert!(
        (115..=145).contains(&home_at),
        "nest reached at tick {}",
        home_at
    );

    let ant = &env.ants()[0];
    assert_eq!(ant.pos(), Vec2::ZERO, "the ant snaps onto the nest");
    assert!(ant.found_food);
    assert!(ant.found_nest);
    assert!(!ant.carrying_food);
    assert!(ant.life_time < 200);
}

#[test]
fn test_positions_and_headings_stay_in_range() {
    let mut scenario = foraging_scenario(0.02, 60);
    scenario.ant_templates[0].left_sensor = Some(SensorParameters {
        x_center_distance: 0.03,
        y_center_distance: 0.03,
        position_angle: 45.0,
        pixel_radius: 2,
    });
    scenario.ant_templates[0].right_sensor = Some(SensorParameters {
        x_center_distance: 0.03,
        y_center_distance: 0.03,
        position_angle: -45.0,
        pixel_radius: 2,
    });
    scenario.rates.pheromone_evaporation_rate = 4;
    let mut env = populated(scenario);

    for tick in 1..=1500 {
        env.run(tick % 1000).unwrap();
        for ant in env.ants() {
            let pos = ant.pos();
            assert!(
                (LOWER_BOUND..=UPPER_BOUND).contains(&pos.x)
                    && (LOWER_BOUND..=UPPER_BOUND).contains(&pos.y),
                "ant {} left the plane at {:?}",
                ant.id,
                pos
            );
            assert!(
                (0.0..TAU).contains(&ant.theta()),
                "ant {} heading {} not wrapped",
                ant.id,
                ant.theta()
            );
            assert_eq!(ant.pheromone_type() != -1, ant.pheromone().is_some());
        }
    }
    assert_eq!(env.census().total(), 60);
}

#[test]
fn test_stalled_ant_is_recalled_to_origin() {
    let mut env = populated(foraging_scenario(0.0, 1));
    env.ants_mut()[0].set_pos(Vec2::new(0.3, -0.3));

    for tick in 1..LIFETIME_LIMIT {
        env.run(tick).unwrap();
    }
    let ant = &env.ants()[0];
    assert_eq!(ant.state(), AntState::Explorer);
    assert_eq!(ant.pos(), Vec2::new(0.3, -0.3));
    assert_eq!(ant.life_time, LIFETIME_LIMIT - 1);

    env.run(LIFETIME_LIMIT).unwrap();
    let ant = &env.ants()[0];
    assert_eq!(ant.state(), AntState::NestCarrier);
    assert_eq!(ant.pos(), Vec2::ZERO);
    assert_eq!(ant.life_time, 0);
    assert_eq!(ant.pheromone_type(), 2);
}

#[test]
fn test_overlapping_food_first_declared_wins() {
    let mut scenario = foraging_scenario(0.0, 1);
    scenario.foods = vec![
        FoodParameters {
            id: 7,
            pos: Vec2::new(0.2, 0.2),
            size: 0.1,
            food_amount: 10,
        },
        FoodParameters {
            id: 8,
            pos: Vec2::new(0.25, 0.25),
            size: 0.1,
            food_amount: 10,
        },
    ];
    let mut env = populated(scenario);
    env.ants_mut()[0].set_pos(Vec2::new(0.22, 0.22));

    env.run(1).unwrap();
    let ant = &env.ants()[0];
    assert_eq!(ant.state(), AntState::Carrier);
    assert_eq!(ant.pos(), env.foods()[0].pos);
    assert!(ant.carrying_food);
}

#[test]
fn test_simulator_drives_startup_sequence() {
    let mut sim = Simulator::new(foraging_scenario(0.01, 10)).unwrap();
    sim.populate().unwrap();
    sim.apply("add-ants:0".parse().unwrap()).unwrap();
    assert_eq!(sim.environment.number_of_ants(), 20);

    sim.apply(DriverAction::Resume).unwrap();
    for _ in 0..1200 {
        sim.update().unwrap();
    }
    assert_eq!(sim.steps, 1200);
    assert_eq!(sim.frame_counter, 200);
    assert!(
        sim.environment
            .ants()
            .iter()
            .all(|ant| wrap_angle(ant.theta()) == ant.theta())
    );

    sim.apply(DriverAction::Pause).unwrap();
    assert_eq!(sim.update().unwrap(), None);
    assert_eq!(sim.steps, 1200);
}

#[test]
fn test_spawned_ants_lay_red_whatever_their_initial_state() {
    for state in [AntState::BackHome, AntState::Carrier] {
        let mut scenario = foraging_scenario(0.0, 1);
        scenario.ant_templates[0].initial_state = state;
        let mut env = populated(scenario);
        assert_eq!(env.ants()[0].state(), state);
        assert_eq!(env.ants()[0].pheromone_type(), 1, "{:?}", state);

        env.place_pheromone(0).unwrap();
        assert_eq!(
            env.pheromone_total(shared::PheromoneChannel::Red),
            60,
            "{:?}",
            state
        );
    }
}

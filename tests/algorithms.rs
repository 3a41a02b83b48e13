//! End-to-end tests running every search driver against a small, exactly
//! solvable permutation-TSP instance: a 4-city square with perimeter edges
//! of length 1 and diagonals of length 2, whose optimal tour (going around
//! the perimeter) has length 4.

use tree_search_solver::schemes::permutation_tsp::PermutationTsp;
use tree_search_solver::{
    anytime_column_search, best_first_search, best_first_search_2, depth_first_search, greedy,
    iterative_beam_search, iterative_memory_bounded_best_first_search,
    nested_best_first_breadth_first_search, AnytimeColumnSearchParameters,
    BestFirstSearch2Parameters, BestFirstSearchParameters, BranchingScheme, CommonParameters,
    DepthFirstSearchParameters, GreedyParameters, ImbbfsParameters, IterativeBeamSearchParameters,
    NestedBestFirstBreadthFirstSearchParameters,
};

fn square_instance() -> PermutationTsp {
    PermutationTsp::new(vec![
        vec![0.0, 1.0, 2.0, 1.0],
        vec![1.0, 0.0, 1.0, 2.0],
        vec![2.0, 1.0, 0.0, 1.0],
        vec![1.0, 2.0, 1.0, 0.0],
    ])
}

#[test]
fn best_first_search_finds_the_optimal_tour_exhaustively() {
    let scheme = square_instance();
    let parameters = BestFirstSearchParameters {
        common: CommonParameters::default(),
    };
    let output = best_first_search(&scheme, parameters).unwrap();
    assert!(output.exhaustive);
    assert_eq!(scheme.display(output.solution_pool.best()), "4");
}

#[test]
fn best_first_search_2_finds_the_optimal_tour_exhaustively() {
    let scheme = square_instance();
    let parameters = BestFirstSearch2Parameters {
        common: CommonParameters::default(),
    };
    let output = best_first_search_2(&scheme, parameters).unwrap();
    assert!(output.exhaustive);
    assert_eq!(scheme.display(output.solution_pool.best()), "4");
}

#[test]
fn imbbfs_finds_the_optimal_tour() {
    let scheme = square_instance();
    let parameters = ImbbfsParameters {
        common: CommonParameters::default(),
        ..ImbbfsParameters::default()
    };
    let output = iterative_memory_bounded_best_first_search(&scheme, parameters).unwrap();
    assert_eq!(scheme.display(output.solution_pool.best()), "4");
}

#[test]
fn iterative_beam_search_finds_the_optimal_tour() {
    let scheme = square_instance();
    let parameters = IterativeBeamSearchParameters {
        common: CommonParameters::default(),
        ..IterativeBeamSearchParameters::default()
    };
    let output = iterative_beam_search(&scheme, parameters).unwrap();
    assert_eq!(scheme.display(output.solution_pool.best()), "4");
}

#[test]
fn anytime_column_search_finds_the_optimal_tour() {
    let scheme = square_instance();
    let parameters = AnytimeColumnSearchParameters {
        common: CommonParameters::default(),
        ..AnytimeColumnSearchParameters::default()
    };
    let output = anytime_column_search(&scheme, parameters).unwrap();
    assert_eq!(scheme.display(output.solution_pool.best()), "4");
}

#[test]
fn depth_first_search_finds_the_optimal_tour() {
    let scheme = square_instance();
    let parameters = DepthFirstSearchParameters {
        common: CommonParameters::default(),
    };
    let output = depth_first_search(&scheme, parameters).unwrap();
    assert!(output.exhaustive);
    assert_eq!(scheme.display(output.solution_pool.best()), "4");
}

#[test]
fn greedy_descent_reaches_a_complete_tour() {
    let scheme = square_instance();
    let parameters = GreedyParameters {
        common: CommonParameters::default(),
    };
    let output = greedy(&scheme, parameters).unwrap();
    // Greedy only ever follows one path, so it is not guaranteed to find the
    // optimum, but it must reach some complete tour.
    assert_ne!(scheme.display(output.solution_pool.best()), "");
}

#[test]
fn nested_best_first_breadth_first_search_finds_the_optimal_tour() {
    let scheme = square_instance();
    let parameters = NestedBestFirstBreadthFirstSearchParameters {
        common: CommonParameters::default(),
    };
    let output = nested_best_first_breadth_first_search(&scheme, parameters).unwrap();
    assert_eq!(scheme.display(output.solution_pool.best()), "4");
}

#[test]
fn node_budget_is_honored() {
    let scheme = square_instance();
    let mut common = CommonParameters::default();
    common.maximum_number_of_nodes = 1;
    let parameters = BestFirstSearchParameters { common };
    let output = best_first_search(&scheme, parameters).unwrap();
    assert!(!output.exhaustive);
    assert!(output.counters.number_of_nodes <= 3);
}

#[test]
fn rejects_a_zero_sized_solution_pool() {
    let scheme = square_instance();
    let mut common = CommonParameters::default();
    common.maximum_size_of_the_solution_pool = 0;
    let parameters = BestFirstSearchParameters { common };
    assert!(best_first_search(&scheme, parameters).is_err());
}

#[test]
fn imbbfs_rejects_an_inverted_queue_size_range() {
    let scheme = square_instance();
    let parameters = ImbbfsParameters {
        common: CommonParameters::default(),
        minimum_size_of_the_queue: 100,
        maximum_size_of_the_queue: 1,
        growth_factor: 1.5,
    };
    assert!(iterative_memory_bounded_best_first_search(&scheme, parameters).is_err());
}

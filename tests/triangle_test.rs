use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tricount::generate::{complete_graph, cycle_graph, path_graph, random_graph};
use tricount::{
    count_triangles, count_triangles_parallel, dense_triangle_count, from_edges, partition,
    triangles_per_vertex, Backend, CountConfig, CsrStore, PartitionError, TriangleCounter,
    TriangleError,
};

fn shared(n: usize, edges: &[(usize, usize)]) -> Arc<CsrStore> {
    Arc::new(from_edges(n, edges).unwrap())
}

#[test]
fn test_triangle_with_pendant() {
    // 4 vertices, edges {0,1},{1,2},{2,0},{2,3}
    let store = shared(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]);
    assert_eq!(count_triangles(&store), 1);
    assert_eq!(count_triangles_parallel(&store, 2, Backend::Rayon).unwrap(), 1);
    assert_eq!(
        triangles_per_vertex(&store, 2, Backend::Sequential).unwrap(),
        vec![1, 1, 1, 0]
    );
}

#[test]
fn test_small_shapes() {
    assert_eq!(count_triangles(&from_edges(3, &cycle_graph(3)).unwrap()), 1);
    assert_eq!(count_triangles(&from_edges(3, &path_graph(3)).unwrap()), 0);
    assert_eq!(count_triangles(&from_edges(10, &cycle_graph(10)).unwrap()), 0);
    assert_eq!(count_triangles(&from_edges(4, &complete_graph(4)).unwrap()), 4);
    assert_eq!(count_triangles(&from_edges(5, &complete_graph(5)).unwrap()), 10);
}

#[test]
fn test_empty_graph() {
    assert_eq!(count_triangles(&CsrStore::empty(0)), 0);

    let isolated = shared(5, &[]);
    for backend in Backend::ALL {
        assert_eq!(count_triangles_parallel(&isolated, 5, backend).unwrap(), 0);
    }
}

#[test]
fn test_k4_per_vertex() {
    let store = shared(4, &complete_graph(4));
    for backend in Backend::ALL {
        for workers in 1..=4 {
            assert_eq!(
                triangles_per_vertex(&store, workers, backend).unwrap(),
                vec![3, 3, 3, 3],
                "{} with {} workers",
                backend,
                workers
            );
        }
    }
}

#[test]
fn test_all_backends_match_sequential_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(99);
    for &(n, density) in &[(16usize, 0.5), (50, 0.2), (120, 0.05)] {
        let store = shared(n, &random_graph(&mut rng, n, density));
        let expected = count_triangles(&store);

        for backend in Backend::ALL {
            for workers in [1usize, 2, 4, 8] {
                let got = count_triangles_parallel(&store, workers, backend).unwrap();
                assert_eq!(got, expected, "n={} {} x{}", n, backend, workers);
            }
        }
    }
}

#[test]
fn test_matches_dense_trace() {
    let mut rng = StdRng::seed_from_u64(5);
    for &n in &[6usize, 20, 45] {
        let edges = random_graph(&mut rng, n, 0.3);
        let store = from_edges(n, &edges).unwrap();

        let mut dense = Array2::<u32>::zeros((n, n));
        for &(u, v) in &edges {
            dense[[u, v]] = 1;
            dense[[v, u]] = 1;
        }

        assert_eq!(store.to_dense(), dense);
        assert_eq!(CsrStore::from_dense(&dense).unwrap(), store);
        assert_eq!(count_triangles(&store), dense_triangle_count(&dense));
    }
}

#[test]
fn test_per_vertex_sums_to_three_times_total() {
    let mut rng = StdRng::seed_from_u64(11);
    let store = shared(80, &random_graph(&mut rng, 80, 0.1));

    let report = TriangleCounter::new(CountConfig::new(4, Backend::Async).with_per_vertex(true))
        .run(&store)
        .unwrap();
    let per_vertex = report.per_vertex.unwrap();

    assert_eq!(per_vertex.len(), 80);
    assert_eq!(per_vertex.iter().sum::<u64>(), 3 * report.total);
    assert_eq!(report.total, count_triangles(&store));
}

#[test]
fn test_worker_count_errors() {
    let store = shared(3, &cycle_graph(3));
    for backend in Backend::ALL {
        assert!(matches!(
            count_triangles_parallel(&store, 5, backend),
            Err(TriangleError::Partition(PartitionError::TooManyWorkers { .. }))
        ));
    }
    assert_eq!(partition(&store, 0).unwrap_err(), PartitionError::ZeroWorkers);
}

#[test]
fn test_report_serializes() {
    let store = shared(5, &complete_graph(5));
    let report = TriangleCounter::new(CountConfig::new(2, Backend::Scoped))
        .run(&store)
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["total"], 10);
    assert_eq!(json["backend"], "scoped");
    assert_eq!(json["partitions"].as_array().unwrap().len(), 2);
    assert!(json["per_vertex"].is_null());
}

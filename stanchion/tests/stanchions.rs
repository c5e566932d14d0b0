use stanchion::algorithms::rotation::rotation_at;
use stanchion::geometry::math::seg_distance_sq;
use stanchion::model::Vec2;
use stanchion::{
    Adjacency, CrossMode, DrawCommand, Graph, StanchionOutput, StanchionParams, StrokeColor, Surface,
    TwistMode,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).len() < 1e-3
}

fn single_edge() -> Graph {
    let mut g = Graph::new();
    let a = g.add_vertex(0.0, 0.0).unwrap();
    let b = g.add_vertex(100.0, 0.0).unwrap();
    g.add_link(a, b).expect("link");
    g
}

fn triangle() -> Graph {
    let mut g = Graph::new();
    let v0 = g.add_vertex(0.0, 0.0).unwrap();
    let v1 = g.add_vertex(100.0, 0.0).unwrap();
    let v2 = g.add_vertex(50.0, 86.6).unwrap();
    g.add_link(v0, v1).unwrap();
    g.add_link(v1, v2).unwrap();
    g.add_link(v2, v0).unwrap();
    g
}

fn square() -> Graph {
    let mut g = Graph::new();
    let ids: Vec<u32> = [(0.0, 0.0), (80.0, 0.0), (80.0, 80.0), (0.0, 80.0)]
        .iter()
        .map(|&(x, y)| g.add_vertex(x, y).unwrap())
        .collect();
    for i in 0..4 {
        g.add_link(ids[i], ids[(i + 1) % 4]).unwrap();
    }
    g
}

fn path3() -> Graph {
    let mut g = Graph::new();
    let a = g.add_vertex(0.0, 0.0).unwrap();
    let b = g.add_vertex(100.0, 0.0).unwrap();
    let c = g.add_vertex(100.0, 80.0).unwrap();
    g.add_link(a, b).unwrap();
    g.add_link(b, c).unwrap();
    g
}

fn k4() -> Graph {
    let mut g = Graph::new();
    let v: Vec<u32> = [(0.0, 0.0), (100.0, 0.0), (50.0, 86.6), (50.0, 30.0)]
        .iter()
        .map(|&(x, y)| g.add_vertex(x, y).unwrap())
        .collect();
    for (a, b) in [(0, 1), (1, 2), (2, 0), (0, 3), (1, 3), (2, 3)] {
        g.add_link(v[a], v[b]).unwrap();
    }
    g
}

fn star() -> Graph {
    let mut g = Graph::new();
    let hub = g.add_vertex(200.0, 200.0).unwrap();
    for (x, y) in [(300.0, 200.0), (200.0, 320.0), (90.0, 200.0), (200.0, 110.0), (280.0, 120.0)] {
        let s = g.add_vertex(x, y).unwrap();
        g.add_link(hub, s).unwrap();
    }
    g
}

fn dist_to_link(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    seg_distance_sq(p.x, p.y, a.x, a.y, b.x, b.y).0.sqrt()
}

fn dist_to_any_link(g: &Graph, p: Vec2) -> f32 {
    g.links()
        .filter_map(|(_, l)| Some(dist_to_link(p, g.get_vertex(l.a)?, g.get_vertex(l.b)?)))
        .fold(f32::INFINITY, f32::min)
}

#[test]
fn single_edge_quarter_points() {
    let params = StanchionParams { h: 10.0, ..Default::default() };
    let map = single_edge().combinatorial_map(&params).unwrap();
    assert_eq!(map.len(), 4);
    let pos: Vec<Vec2> = map.iter().map(|q| q.pos).collect();
    assert!(close(pos[0], Vec2::new(0.0, -10.0)));
    assert!(close(pos[1], Vec2::new(0.0, 10.0)));
    assert!(close(pos[2], Vec2::new(100.0, 10.0)));
    assert!(close(pos[3], Vec2::new(100.0, -10.0)));

    let edge = |id| map.follow(id, Adjacency::Edge).unwrap().id;
    let jump = |id| map.follow(id, Adjacency::Jump).unwrap().id;
    assert_eq!((edge(0), edge(1), edge(2), edge(3)), (3, 2, 1, 0));
    assert_eq!((jump(0), jump(1), jump(2), jump(3)), (1, 0, 3, 2));
    map.check_invariants().unwrap();

    let trace = single_edge().trace_stanchions(&params).unwrap();
    assert_eq!(trace.cycles.len(), 1);
}

#[test]
fn single_edge_leaf_control_points_sit_behind_vertex() {
    let map = single_edge().combinatorial_map(&StanchionParams::default()).unwrap();
    let q0 = map.get(0).unwrap();
    let q2 = map.get(2).unwrap();
    assert!(q0.cp.x < 0.0);
    assert!(q2.cp.x > 100.0);
}

#[test]
fn triangle_rotation_and_walks() {
    init_tracing();
    let g = triangle();
    let order = |v| rotation_at(&g, v).into_iter().map(|(n, _)| n).collect::<Vec<_>>();
    assert_eq!(order(0), vec![1, 2]);
    assert_eq!(order(1), vec![2, 0]);
    assert_eq!(order(2), vec![0, 1]);

    let params = StanchionParams::default();
    let map = g.combinatorial_map(&params).unwrap();
    assert_eq!(map.len(), 12);
    map.check_invariants().unwrap();

    // Three half twists around an odd cycle leave a single boundary
    let trace = g.trace_stanchions(&params).unwrap();
    assert_eq!(trace.cycles.len(), 1);
    assert_eq!(trace.cycles[0].quarter_points, vec![0, 6, 5, 11, 8, 2, 1, 7, 4, 10, 9, 3]);
    assert_eq!(trace.cycles[0].stroke(), StrokeColor::White);
}

#[test]
fn square_splits_into_two_walks() {
    let trace = square().trace_stanchions(&StanchionParams::default()).unwrap();
    assert_eq!(trace.cycles.len(), 2);
    assert_eq!(trace.cycles[0].quarter_points, vec![0, 6, 5, 11, 8, 12, 15, 3]);
    assert_eq!(trace.cycles[1].quarter_points, vec![1, 7, 4, 10, 9, 13, 14, 2]);
    assert_eq!(trace.cycles[1].stroke(), StrokeColor::Red);
}

#[test]
fn crossings_stay_on_the_crossed_link() {
    init_tracing();
    let h = 10.0;
    for mode in [CrossMode::Cut, CrossMode::DoublePath] {
        let params = StanchionParams { h, cross_mode: mode, ..Default::default() };
        for (name, g) in [("path", path3()), ("triangle", triangle()), ("k4", k4()), ("star", star())] {
            let map = g.combinatorial_map(&params).unwrap();
            let trace = g.trace_stanchions(&params).unwrap();
            for cycle in &trace.cycles {
                for pair in cycle.quarter_points.chunks(2) {
                    let from = map.get(pair[0]).unwrap();
                    let to = map.get(pair[1]).unwrap();
                    let (a, b) = (from.vertex_pos, to.vertex_pos);
                    assert_eq!(map.follow(from.id, Adjacency::Edge).unwrap().vertex_adj, to.vertex_adj);
                    for p in [from.quarter_edge_point, to.quarter_edge_point, from.middle_edge_point, to.middle_edge_point] {
                        let d = dist_to_link(p, a, b);
                        assert!(d <= 1.5 * h, "{} {:?}: crossing {}->{} strays {}", name, mode, from.id, to.id, d);
                    }
                }
            }
            // Nothing drawn cuts across the board between links
            for cmd in &trace.commands {
                let mid = match cmd {
                    DrawCommand::Line { from, to, .. } => from.midpoint(*to),
                    DrawCommand::Bezier { curve, .. } => curve.eval(0.5),
                };
                let d = dist_to_any_link(&g, mid);
                assert!(d <= 1.6 * h, "{} {:?}: stroke midpoint {:?} is {} off", name, mode, mid, d);
            }
        }
    }
}

#[test]
fn double_path_crosses_over_the_whole_link() {
    let params = StanchionParams {
        cross_ratio: 0.3,
        cross_mode: CrossMode::DoublePath,
        ..Default::default()
    };
    let map = single_edge().combinatorial_map(&params).unwrap();
    assert_eq!(map.cross_ratio(), 1.0);
    for q in map.iter() {
        assert!(close(q.quarter_edge_point, q.pos), "qp {}", q.id);
    }
}

#[test]
fn adaptive_height_matches_fixed_height_on_uniform_links() {
    let mut g = Graph::new();
    let corners = [(0.0, 0.0), (80.0, 0.0), (80.0, 80.0), (0.0, 80.0)];
    let ids: Vec<u32> = corners.iter().map(|&(x, y)| g.add_vertex(x, y).unwrap()).collect();
    for i in 0..4 {
        g.add_link(ids[i], ids[(i + 1) % 4]).unwrap();
    }
    let fixed = StanchionParams { h: 10.0, ..Default::default() };
    let adaptive = StanchionParams { adapt_to_edge_length: true, ..fixed.clone() };
    let a = g.combinatorial_map(&fixed).unwrap();
    let b = g.combinatorial_map(&adaptive).unwrap();
    for (qa, qb) in a.iter().zip(b.iter()) {
        assert!(close(qa.pos, qb.pos), "qp {}", qa.id);
    }
}

#[test]
fn adaptive_height_follows_each_link() {
    let mut g = Graph::new();
    let a = g.add_vertex(0.0, 0.0).unwrap();
    let b = g.add_vertex(80.0, 0.0).unwrap();
    let c = g.add_vertex(80.0, 200.0).unwrap();
    g.add_link(a, b).unwrap();
    g.add_link(b, c).unwrap();
    let fixed = StanchionParams { h: 10.0, ..Default::default() };
    let adaptive = StanchionParams { adapt_to_edge_length: true, ..fixed.clone() };
    let m1 = g.combinatorial_map(&fixed).unwrap();
    let m2 = g.combinatorial_map(&adaptive).unwrap();
    assert!(m1.iter().zip(m2.iter()).any(|(x, y)| !close(x.pos, y.pos)));
    // The leaf at `a` sits on an 80 long link, so nothing changes there
    assert!(close(m1.get(0).unwrap().pos, m2.get(0).unwrap().pos));
}

#[test]
fn isolated_vertices_get_no_quarter_points() {
    let mut g = single_edge();
    let lonely = g.add_vertex(500.0, 500.0).unwrap();
    let map = g.combinatorial_map(&StanchionParams::default()).unwrap();
    assert_eq!(map.len(), 4);
    assert!(map.iter().all(|q| q.vertex_adj != lonely));
}

#[test]
fn twist_moves_only_the_middle_points() {
    let base = StanchionParams::default();
    let twisted = StanchionParams { twist_mode: TwistMode::Along, twist_value: 1.0, ..base.clone() };
    let g = triangle();
    let m1 = g.combinatorial_map(&base).unwrap();
    let m2 = g.combinatorial_map(&twisted).unwrap();
    for (a, b) in m1.iter().zip(m2.iter()) {
        assert!(close(a.quarter_edge_point, b.quarter_edge_point));
        assert!(!close(a.middle_edge_point, b.middle_edge_point));
    }
}

#[test]
fn cut_export_has_one_path_per_walk() {
    init_tracing();
    let out = square()
        .draw_combinatorial_map(&StanchionParams::default(), Surface::SvgFile)
        .unwrap();
    let StanchionOutput::Export { filename, svg } = out else { panic!("expected export") };
    assert_eq!(filename, "moebius_stanchions.svg");
    assert!(svg.contains("viewBox=\"0 0 600 600\""));
    // 4 white links plus 2 walks
    assert_eq!(svg.matches("<path ").count(), 6);
    assert!(svg.contains("stroke:red"));
    assert!(!svg.contains("z-level"));
}

#[test]
fn double_path_export_is_layered() {
    init_tracing();
    let params = StanchionParams { cross_mode: CrossMode::DoublePath, ..Default::default() };
    let StanchionOutput::Export { svg, .. } =
        triangle().draw_combinatorial_map(&params, Surface::SvgFile).unwrap()
    else {
        panic!("expected export")
    };
    let at = |s: &str| svg.find(s).unwrap_or_else(|| panic!("missing {}", s));
    assert!(at("<!-- z-level 0 -->") < at("<!-- z-level 1 -->"));
    assert!(at("<!-- z-level 1 -->") < at("class=\"crossBorder\""));
    assert!(at("class=\"crossBorder\"") < at("<!-- z-level 2 -->"));
    assert!(at("<!-- z-level 2 -->") < at("<!-- z-level 3 -->"));
    assert!(!svg.contains("class=\"cycle2\""));
}

#[test]
fn preview_and_export_trace_the_same_cycles() {
    let g = triangle();
    let params = StanchionParams::default();
    let StanchionOutput::Preview(trace) = g.draw_combinatorial_map(&params, Surface::Canvas).unwrap() else {
        panic!("expected preview")
    };
    assert_eq!(trace.cycles, g.trace_stanchions(&params).unwrap().cycles);
    assert!(!trace.commands.is_empty());
}

// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full lasso round: draw, pay, wait, damage, regenerate.
//!
//! Draws a figure-eight against a resource pool, then an oversized square
//! that gets scaled down to what is left. Each committed lasso is turned
//! into a damage area that is ticked at 60 Hz until it fires over a handful
//! of enemies, and the resource it cost is queued to regenerate.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p corral_demos --example figure_eight_lasso`

use corral_budget::{Budget, BudgetError};
use corral_lasso::{CommittedLasso, LassoParams, LassoRejection, LassoSession};
use kurbo::Point;
use log::info;

const FRAME: f64 = 1.0 / 60.0;

fn figure_eight() -> Vec<Point> {
    [
        (0.0, 0.0),
        (1.0, 0.0),
        (2.0, 0.0),
        (6.0, 4.0),
        (7.0, 4.0),
        (8.0, 4.0),
        (8.0, 2.0),
        (8.0, 0.0),
        (7.0, 0.0),
        (6.0, 0.0),
        (2.0, 4.0),
        (1.0, 4.0),
        (0.0, 4.0),
        (0.0, 2.0),
        (0.0, 0.3),
    ]
    .iter()
    .map(|&(x, y)| Point::new(x, y))
    .collect()
}

fn big_square() -> Vec<Point> {
    let mut points = Vec::new();
    for k in 0..=20 {
        points.push(Point::new(f64::from(k), 0.0));
    }
    for k in 1..=20 {
        points.push(Point::new(20.0, f64::from(k)));
    }
    for k in 1..=20 {
        points.push(Point::new(20.0 - f64::from(k), 20.0));
    }
    for k in 1..20 {
        points.push(Point::new(0.0, 20.0 - f64::from(k)));
    }
    points.push(Point::new(0.0, 0.2));
    points
}

fn draw(
    session: &mut LassoSession,
    stroke: &[Point],
    budget: &mut Budget,
) -> Result<CommittedLasso, LassoRejection> {
    let Some((&first, rest)) = stroke.split_first() else {
        return Err(LassoRejection::NotDrawing);
    };
    if !session.begin(first, Some(&*budget)) {
        return Err(BudgetError::Exhausted.into());
    }
    let Some((&last, middle)) = rest.split_last() else {
        session.cancel();
        return Err(LassoRejection::NotDrawing);
    };
    for &point in middle {
        session.drag(point);
    }
    session.release(last, Some(budget))
}

fn main() {
    env_logger::init();

    let enemies = [
        ("worm", Point::new(1.0, 2.0)),
        ("trojan", Point::new(7.0, 2.0)),
        ("rootkit", Point::new(4.0, 3.5)),
        ("adware", Point::new(12.0, 12.0)),
    ];

    let mut budget = Budget::new(124.0, 30.0);
    let mut session = LassoSession::new(LassoParams::default());

    for (name, stroke) in [("figure-eight", figure_eight()), ("big square", big_square())] {
        let lasso = match draw(&mut session, &stroke, &mut budget) {
            Ok(lasso) => lasso,
            Err(rejection) => {
                println!("{name}: rejected ({rejection})");
                continue;
            }
        };
        println!(
            "{name}: {} polygon(s), {} triangles, area {:.2}, cost {:.2}{}, budget {:.2}/{:.2}",
            lasso.polygons.len(),
            lasso.mesh.triangle_count(),
            lasso.area,
            lasso.cost,
            if lasso.clamped { " (scaled to fit)" } else { "" },
            budget.current(),
            budget.max(),
        );

        let mut area = lasso.damage_area();
        let mut frames = 0_u32;
        let region = loop {
            frames += 1;
            if let Some(region) = area.tick(FRAME) {
                break region;
            }
        };
        let hits = region.hits(enemies.iter().copied());
        info!("{name} fired after {frames} frames");
        println!("{name}: {} damage to {hits:?}", region.damage());

        budget.regenerate_over_time(region.spent());
    }

    // Both refills run side by side.
    for _ in 0..60 {
        budget.tick(FRAME);
    }
    println!(
        "after one second: budget {:.2}/{:.2}, {:.2} still pending",
        budget.current(),
        budget.max(),
        budget.pending_regen()
    );
}

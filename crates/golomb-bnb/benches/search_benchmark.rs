// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use golomb_bnb::bnb::BnbSolver;
use golomb_bnb::monitor::no_op::NoOperationMonitor;
use golomb_model::known::KnownOptimalTable;
use golomb_search::shape::RulerShape;
use std::hint::black_box;

fn bench_known_optimal_shapes(c: &mut Criterion) {
    let table = KnownOptimalTable::global();
    let mut group = c.benchmark_group("search_benchmark");

    for marks in 5..=9 {
        let length = table
            .length(marks)
            .unwrap_or_else(|| panic!("no known optimal length for {} marks", marks));
        let shape = RulerShape::new(marks, length)
            .unwrap_or_else(|e| panic!("invalid benchmark shape: {}", e));

        let mut solver = BnbSolver::preallocated(marks, length);

        group.throughput(Throughput::Elements(marks as u64));
        group.bench_with_input(
            BenchmarkId::new("found", format!("n{}_l{}", marks, length)),
            &shape,
            |b, shape| {
                b.iter(|| {
                    let outcome = solver.solve(black_box(shape), NoOperationMonitor::new());
                    if outcome.ruler().is_none() {
                        panic!("Benchmark configuration error: known optimal shape not found.");
                    }
                })
            },
        );

        // One unit shorter than the optimum forces an exhaustive search.
        let infeasible = RulerShape::new(marks, length - 1)
            .unwrap_or_else(|e| panic!("invalid benchmark shape: {}", e));
        group.bench_with_input(
            BenchmarkId::new("exhausted", format!("n{}_l{}", marks, length - 1)),
            &infeasible,
            |b, shape| {
                b.iter(|| black_box(solver.solve(black_box(shape), NoOperationMonitor::new())))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_known_optimal_shapes);
criterion_main!(benches);

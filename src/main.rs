use flexi_logger::Logger;
use log::info;

use blocksplit::{
    par_block_costs, split_ab, split_ab_blocks, try_distribute_with_config, try_split_diagonal,
    BalanceConfig, SparseMatrixCSR,
};

/// Builds an upper-triangular operator whose diagonal blocks are dense
fn block_operator(block_sizes: &[i32]) -> SparseMatrixCSR<f64> {
    let mut triplets = Vec::new();
    let mut offset = 0;
    for &size in block_sizes {
        let size = size as usize;
        for i in offset..offset + size {
            for j in i..offset + size {
                triplets.push((i, j, 1.0 / (1.0 + (j - i) as f64)));
            }
        }
        offset += size;
    }
    SparseMatrixCSR::from_triplets(offset, offset, &triplets)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let mut config = BalanceConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        config.n_threads = arg.parse()?;
    }

    run(&config)
}

/// Splits and distributes a synthetic operator with `config`
fn run(config: &BalanceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Irregular block sizes, with the occasional zero entry the assembler emits
    let block_sizes: Vec<i32> = (0..24).map(|k| if k % 11 == 5 { 0 } else { (k * 7) % 9 + 1 }).collect();
    let n = block_sizes.iter().sum::<i32>() as usize;
    let h = block_operator(&block_sizes);
    info!(n, nnz = h.nnz(), blocks = block_sizes.len(); "Built block operator");

    let (a, b) = split_ab(&h, &block_sizes, n);
    info!(nnz_a = a.nnz(), nnz_b = b.nnz(); "Two-colored split");

    let (list_a, list_b) = split_ab_blocks(&h, &block_sizes, n);
    for (name, list) in [("A", list_a), ("B", list_b)] {
        let costs = par_block_costs(&list);
        let assignment = try_distribute_with_config(list, config)?;
        let report = assignment.report();
        info!(
            list = name,
            blocks = costs.len(),
            threads = assignment.n_threads(),
            passes = report.passes,
            greedy_imbalance = report.greedy_imbalance,
            imbalance = report.final_imbalance;
            "Distributed block list"
        );
        for (thread, bin) in assignment.bins().iter().enumerate() {
            info!(list = name, thread, blocks = bin.len(), cost = bin.cost(); "Thread bin");
        }
    }

    let drift = SparseMatrixCSR::from_triplets(
        n,
        n,
        &(0..n).map(|i| (i, i, i as f64)).collect::<Vec<_>>(),
    );
    let parts = try_split_diagonal(&drift, config.n_threads)?;
    info!(chunks = parts.len(); "Split diagonal drift");

    Ok(())
}

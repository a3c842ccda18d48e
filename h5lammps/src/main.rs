use shared::{
    Result,
    info,
};

use h5lammps::cli::run;

fn main() -> Result<()> {
    let now = std::time::Instant::now();

    run()?;

    info!("Time used: {:?}", now.elapsed());
    Ok(())
}

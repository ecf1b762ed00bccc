use linea_core::config::builtin;

pub fn list() -> Result<(), linea_core::error::LineaError> {
    println!("Available predefined tolerances:\n");
    for name in builtin::PRESETS {
        let config = builtin::load_preset(name)?;
        println!("  {:<10} {:>4.1}", name, config.tolerance);
        if let Some(desc) = builtin::describe_preset(name) {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

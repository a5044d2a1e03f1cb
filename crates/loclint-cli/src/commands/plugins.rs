use loclint_plugin_api::PluginDescriptor;
use loclint_services::PluginRegistry;

pub fn run_plugins(registry: &PluginRegistry) -> color_eyre::Result<i32> {
    crate::ui_out!("Importers:");
    for descriptor in registry.importer_descriptors() {
        print_descriptor(&descriptor);
    }
    println!();
    crate::ui_out!("Exporters:");
    for descriptor in registry.exporter_descriptors() {
        print_descriptor(&descriptor);
    }
    Ok(0)
}

fn print_descriptor(descriptor: &PluginDescriptor) {
    crate::ui_out!("  {} — {}", descriptor.id, descriptor.summary);
    for param in descriptor.params {
        let required = if param.required { "required" } else { "optional" };
        crate::ui_out!(
            "      {} ({}, {}) — {}",
            param.name,
            param.kind,
            required,
            param.summary
        );
    }
}

use std::path::Path;

const TEMPLATES: [&str; 4] = ["manifest", "individuals", "samples", "clinical"];

fn main() {
    let template_dir = Path::new("templates");
    for name in TEMPLATES {
        validate_template_file(&template_dir.join(format!("{name}.yaml")), name);
    }
    set_build_dependencies();
}

fn validate_template_file(path: &Path, name: &str) {
    // Templates are embedded with include_str!, so they must exist at build time
    assert!(
        path.exists(),
        "\n\nTEMPLATE BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the template file before building.\n",
        path.display()
    );

    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\nTEMPLATE BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    });

    let template: serde_yaml::Value = serde_yaml::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nTEMPLATE BUILD ERROR: Invalid YAML\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check indentation and quoting.\n",
            path.display()
        );
    });

    validate_template_structure(&template, name, path);
}

fn validate_template_structure(template: &serde_yaml::Value, name: &str, path: &Path) {
    let ok = if name == "samples" {
        template
            .as_sequence()
            .is_some_and(|seq| seq.len() == 1 && seq[0].is_mapping())
    } else {
        template.is_mapping()
    };

    assert!(
        ok,
        "\n\nTEMPLATE BUILD ERROR: Unexpected document shape\n\
         Path: {}\n\
         Hint: '{name}' must be {}.\n",
        path.display(),
        if name == "samples" {
            "a list holding exactly one mapping"
        } else {
            "a mapping"
        }
    );
}

fn set_build_dependencies() {
    println!("cargo:rerun-if-changed=templates");
    for name in TEMPLATES {
        println!("cargo:rerun-if-changed=templates/{name}.yaml");
    }
}

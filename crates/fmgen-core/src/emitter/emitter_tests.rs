#![allow(non_snake_case)]

use super::*;
use crate::diagnostics::Diagnostics;
use crate::schema::{FieldSchema, TypeTag};

fn emit(name: &str, fields: &[FieldSchema]) -> String {
    let mut sink = Diagnostics::new();
    let model = ClassModel::resolve(name, "import", fields, &mut sink).unwrap();
    emit_class(&model, &EmitOptions::default())
}

fn items_table() -> FieldSchema {
    FieldSchema::table(
        "ITEMS",
        vec![
            FieldSchema::scalar("POSNR", TypeTag::Num),
            FieldSchema::scalar("MATERIAL-ID", TypeTag::Char),
            FieldSchema::scalar("QUANTITY", TypeTag::Int),
        ],
    )
}

#[test]
fn emit_class___scalar_fields___declares_serializable_class() {
    let code = emit(
        "GetMaterialImport",
        &[FieldSchema::scalar("MATERIAL-ID", TypeTag::Char)
            .with_description("Material number")
            .with_length(18, 0)],
    );

    assert!(code.starts_with("public class GetMaterialImport implements Serializable {\n"));
    assert!(code.contains("    private static final long serialVersionUID = 337339270983782151L;"));
    assert!(code.contains("    /** Material number (MATERIAL-ID CHAR 18) */\n    private String materialId;"));
    assert!(code.contains("    public GetMaterialImport(String materialId) {\n        this.materialId = materialId;\n    }"));
    assert!(code.contains("    public String getMaterialId() {\n        return this.materialId;\n    }"));
    assert!(code.ends_with("}\n"));
}

#[test]
fn emit_class___constructor___takes_record_types_for_nested_fields() {
    let code = emit(
        "OrderImport",
        &[
            FieldSchema::scalar("ORDER", TypeTag::Char),
            FieldSchema::structure("HEADER", vec![FieldSchema::scalar("PLANT", TypeTag::Char)]),
            items_table(),
        ],
    );

    assert!(code.contains(
        "public OrderImport(String order, JCoStructure header, JCoTable items) {"
    ));
    assert!(code.contains("private Header header;"));
    assert!(code.contains("private List<Items> items;"));
    assert!(code.contains("public List<Items> getItems() {"));
}

#[test]
fn emit_class___structure_field___builds_nested_object_in_child_order() {
    let code = emit(
        "OrderImport",
        &[FieldSchema::structure(
            "HEADER",
            vec![
                FieldSchema::scalar("PLANT", TypeTag::Char),
                FieldSchema::scalar("VALID-FROM", TypeTag::Date),
                FieldSchema::scalar("COUNT", TypeTag::Int),
                FieldSchema::structure("ADDRESS", vec![FieldSchema::scalar("CITY", TypeTag::Char)]),
            ],
        )],
    );

    assert!(code.contains(
        "this.header = new Header(header.getString(\"PLANT\"), header.getDate(\"VALID-FROM\"), \
         header.getInt(\"COUNT\"), header.getStructure(\"ADDRESS\"));"
    ));
}

#[test]
fn emit_class___table_field___iterates_rows_in_order() {
    let code = emit("OrderTable", &[items_table()]);

    let expected = "        this.items = new ArrayList<>();\n\
                    \x20       items.firstRow();\n\
                    \x20       for (int $row = 0; $row < items.getNumRows(); $row++, items.nextRow()) {\n\
                    \x20           this.items.add(new Items(items.getLong(\"POSNR\"), items.getString(\"MATERIAL-ID\"), items.getInt(\"QUANTITY\")));\n\
                    \x20       }\n";
    assert!(code.contains(expected), "{code}");
}

#[test]
fn emit_class___table_field___nested_class_mirrors_children() {
    let code = emit("OrderTable", &[items_table()]);

    assert!(code.contains("    public static class Items implements Serializable {"));
    assert!(code.contains(
        "        public Items(Long posnr, String materialId, Integer quantity) {"
    ));
    assert!(code.contains("        public Long getPosnr() {"));
    assert!(code.contains("        public String getMaterialId() {"));
    assert!(code.contains("        public Integer getQuantity() {"));
}

#[test]
fn emit_class___nested_class___follows_getters_of_enclosing_class() {
    let code = emit(
        "OrderImport",
        &[FieldSchema::structure("HEADER", vec![FieldSchema::scalar("PLANT", TypeTag::Char)])],
    );

    let getter = code.find("public Header getHeader()").unwrap();
    let nested = code.find("public static class Header").unwrap();
    assert!(getter < nested);
}

#[test]
fn emit_class___deep_nesting___indents_by_depth() {
    let code = emit(
        "DeepImport",
        &[FieldSchema::structure(
            "A",
            vec![FieldSchema::structure("B", vec![FieldSchema::scalar("C", TypeTag::Char)])],
        )],
    );

    assert!(code.contains("\n    public static class A implements Serializable {\n"));
    assert!(code.contains("\n        public static class B implements Serializable {\n"));
    assert!(code.contains("\n            private String c;\n"));
}

#[test]
fn emit_class___empty_nested_structure___emits_empty_class() {
    let code = emit("ExtImport", &[FieldSchema::structure("EXTENSION", vec![])]);

    assert!(code.contains("this.extension = new Extension();"));
    assert!(code.contains("        public Extension() {\n        }"));
}

#[test]
fn emit_class___description_with_comment_terminator___is_escaped() {
    let code = emit(
        "X",
        &[FieldSchema::scalar("A", TypeTag::Char).with_description("bad */ text")],
    );

    assert!(code.contains("/** bad *&#47; text (A CHAR) */"));
}

#[test]
fn emit_class___decimals___appear_in_field_doc() {
    let code = emit("X", &[FieldSchema::scalar("PRICE", TypeTag::Bcd).with_length(13, 2)]);

    assert!(code.contains("/** PRICE BCD 13,2 */"));
}

#[test]
fn emit_class___custom_serial_version___is_used() {
    let mut sink = Diagnostics::new();
    let fields = [FieldSchema::scalar("A", TypeTag::Char)];
    let model = ClassModel::resolve("X", "import", &fields, &mut sink).unwrap();

    let code = emit_class(&model, &EmitOptions { serial_version_uid: 42 });

    assert!(code.contains("serialVersionUID = 42L;"));
}

#[test]
fn collect_imports___only_what_fields_need() {
    let mut sink = Diagnostics::new();
    let fields = [
        FieldSchema::scalar("A", TypeTag::Char),
        FieldSchema::structure("S", vec![FieldSchema::scalar("D", TypeTag::Date)]),
    ];
    let model = ClassModel::resolve("X", "import", &fields, &mut sink).unwrap();

    let imports = collect_imports(&model);

    assert_eq!(
        imports,
        [
            "com.sap.conn.jco.JCoStructure",
            "java.io.Serializable",
            "java.util.Date"
        ]
    );
}

#[test]
fn collect_imports___table_pulls_in_collections() {
    let mut sink = Diagnostics::new();
    let fields = [items_table()];
    let model = ClassModel::resolve("X", "tables", &fields, &mut sink).unwrap();

    let imports = collect_imports(&model);

    assert!(imports.contains(&"java.util.List"));
    assert!(imports.contains(&"java.util.ArrayList"));
    assert!(imports.contains(&"com.sap.conn.jco.JCoTable"));
    assert!(!imports.contains(&"java.math.BigDecimal"));
}

#[test]
fn emit_class___names_clashing_with_used_types___do_not_shadow_them() {
    let code = emit(
        "GetOrderImport",
        &[
            FieldSchema::scalar("BUDAT", TypeTag::Date),
            FieldSchema::structure("DATE", vec![FieldSchema::scalar("X", TypeTag::Char)]),
            FieldSchema::table("ITEM", vec![FieldSchema::scalar("Y", TypeTag::Char)]),
            FieldSchema::structure("LIST", vec![FieldSchema::scalar("Z", TypeTag::Char)]),
            FieldSchema::scalar("serialVersionUID", TypeTag::Num),
        ],
    );

    assert!(code.contains("    private Date budat;"));
    assert!(code.contains("    public List<Item> getItems() {"));
    assert!(code.contains("public static class GetOrderImportDate implements Serializable {"));
    assert!(code.contains("public static class GetOrderImportList implements Serializable {"));
    assert!(!code.contains("class Date "));
    assert!(!code.contains("class List "));
    assert!(code.contains("    private Long serialVersionUID2;"));
    assert_eq!(code.matches("serialVersionUID =").count(), 4);
}

use datapath::{Collection, Macros, Map, Object, Record, Value, by, get, set};

/// An author record that serializes to its name alone.
#[derive(Debug, Clone)]
struct Author {
    fields: Object,
}

impl Author {
    fn new(name: &str) -> Self {
        Self {
            fields: Object::new()
                .with("name", name)
                .with("email", format!("{name}@example.com")),
        }
    }
}

impl Record for Author {
    fn field(&self, name: &str) -> Option<&Value> {
        self.fields.field(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.field_mut(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.fields.set_field(name, value);
    }

    fn remove_field(&mut self, _name: &str) -> Option<Value> {
        None
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.field_names()
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn json_serialize(&self) -> Option<Value> {
        self.field("name").cloned()
    }
}

fn post(id: u32, title: &str, tags: &[&str], views: u32, author: &str) -> Value {
    Value::object(
        Object::new()
            .with("id", id)
            .with("title", title)
            .with("tags", Value::list(tags.iter().copied()))
            .with("views", views)
            .with("author", Value::object(Author::new(author))),
    )
}

fn posts() -> Collection {
    Collection::from(vec![
        post(1, "Hello", &["rust", "intro"], 120, "ann"),
        post(2, "Ownership", &["rust"], 300, "bo"),
        post(3, "Gardening", &[], 45, "bo"),
        post(4, "Borrowing", &["rust", "advanced"], 300, "ann"),
    ])
}

fn ids(group: &Value, _: &datapath::Key) -> Value {
    Value::Array(Collection::make(group.clone()).pluck("id").into_items())
}

#[test]
fn grouping_fans_out_over_tags() {
    let by_tag = posts().group_by(by("tags")).map(ids);
    insta::assert_snapshot!(Value::from(by_tag).to_string(), @r#"{"rust":[1,2,4],"intro":[1],"advanced":[4]}"#);

    let by_author = posts().count_by(by("author.name"));
    insta::assert_snapshot!(Value::from(by_author).to_string(), @r#"{"ann":2,"bo":2}"#);
}

#[test]
fn popular_posts_sort_stably() {
    let titles = posts().sort_by_desc(by("views")).pluck("title");
    insta::assert_snapshot!(Value::from(titles).to_string(), @r#"["Ownership","Borrowing","Hello","Gardening"]"#);
}

#[test]
fn view_statistics() {
    let posts = posts();
    let views = by("views");
    let summary = format!(
        "sum={} avg={} median={} mode={} max={}",
        posts.sum_by(&views),
        posts.avg_by(&views).unwrap_or_default(),
        posts.median_by(&views).unwrap_or_default(),
        Value::from(posts.mode_by(&views).unwrap_or_default()),
        posts.max_by(&views).unwrap_or_default(),
    );
    insta::assert_snapshot!(summary, @"sum=765 avg=191.25 median=210 mode=[300] max=300");
}

#[test]
fn pages_serialize_through_record_hooks() {
    let page = posts().for_page(2, 2);
    assert_eq!(page.keys(), Collection::from(vec![2, 3]));
    insta::assert_snapshot!(page.values().to_json(), @r#"[{"id":3,"title":"Gardening","tags":[],"views":45,"author":"bo"},{"id":4,"title":"Borrowing","tags":["rust","advanced"],"views":300,"author":"ann"}]"#);

    let plain: Map = page.values().take(1).to_array();
    insta::assert_snapshot!(Value::Array(plain).to_string(), @r#"[{"id":3,"title":"Gardening","tags":[],"views":45,"author":{"name":"bo","email":"bo@example.com"}}]"#);
}

#[test]
fn writes_reach_records_inside_collections() {
    let mut root = Value::from(posts());
    set(&mut root, "*.featured", false);
    set(&mut root, "1.featured", true);
    set(&mut root, "3.author.name", "cy");

    insta::assert_snapshot!(get(&root, "*.featured").unwrap().to_string(), @"[false,true,false,false]");
    insta::assert_snapshot!(get(&root, "*.author.name").unwrap().to_string(), @r#"["ann","bo","bo","cy"]"#);
}

#[test]
fn extensions_run_by_name() {
    let macros = Macros::new().register("top", |items, args| {
        let n = args.first().and_then(Value::as_f64).unwrap_or(1.0);
        #[allow(clippy::cast_possible_truncation)]
        let n = n as isize;
        Value::from(items.sort_by_desc(by("views")).take(n).pluck("id"))
    });
    let top = posts().call(&macros, "top", &[Value::from(3)]).unwrap();
    insta::assert_snapshot!(top.to_string(), @"[2,4,1]");
}

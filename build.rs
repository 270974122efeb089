// build.rs

fn main() {
    println!("cargo:rerun-if-changed=res/app.ico");

    // Resources are only embedded into Windows executables.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    let mut res = winres::WindowsResource::new();
    res.set_icon("res/app.ico");
    res.set("FileDescription", "Virtual Desktop Indicator");
    res.set("ProductName", "Virtual Desktop Indicator");
    // The tray glyph is drawn at 16x16 device pixels, so the process must be
    // DPI aware or Windows rescales it and blurs the 1-bit font.
    res.set_manifest(r#"
<assembly xmlns="urn:schemas-microsoft-com:asm.v1" manifestVersion="1.0">
<trustInfo xmlns="urn:schemas-microsoft-com:asm.v3">
    <security>
        <requestedPrivileges>
            <requestedExecutionLevel level="asInvoker" uiAccess="false" />
        </requestedPrivileges>
    </security>
</trustInfo>
<application xmlns="urn:schemas-microsoft-com:asm.v3">
    <windowsSettings>
        <dpiAware xmlns="http://schemas.microsoft.com/SMI/2005/WindowsSettings">true</dpiAware>
        <dpiAwareness xmlns="http://schemas.microsoft.com/SMI/2016/WindowsSettings">PerMonitorV2</dpiAwareness>
    </windowsSettings>
</application>
</assembly>
"#);
    if let Err(e) = res.compile() {
        panic!("failed to embed Windows resources: {e}");
    }
}
